//! Digit reduction primitives shared by every numerology calculation.

const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Base-10 digit sum. `digit_sum(0)` is 0.
pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduces a number to a single digit, stopping early on a master number
/// (11, 22, 33) whether it was the input or an intermediate digit sum.
pub fn reduce_keeping_master(mut n: u32) -> u32 {
    if MASTER_NUMBERS.contains(&n) {
        return n;
    }

    while n > 9 {
        n = digit_sum(n);
        if MASTER_NUMBERS.contains(&n) {
            return n;
        }
    }

    n
}

/// Reduces a number to a single digit (1-9), reducing master numbers as well.
/// Used for the final value shown to users. Returns 0 only for input 0.
pub fn reduce_final(mut n: u32) -> u32 {
    while n > 9 {
        n = digit_sum(n);
    }
    n
}
