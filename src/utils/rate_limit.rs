//! Usage limiter for calls to the generation service.
//!
//! Three fixed windows (minute, hour, day) are tracked in an owned value;
//! every operation takes `now` explicitly so behavior is fully testable and
//! nothing lives in process-wide state. The day window resets at the next
//! UTC midnight, the other two at fixed offsets from their start.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub per_minute: u32,
    pub per_hour: u32,
    pub per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: 3,
            per_hour: 10,
            per_day: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStatus {
    pub used: u32,
    pub max: u32,
    pub resets_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub per_minute: WindowStatus,
    pub per_hour: WindowStatus,
    pub per_day: WindowStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    Minute,
    Hour,
    Day,
}

impl LimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitScope::Minute => "per-minute",
            LimitScope::Hour => "hourly",
            LimitScope::Day => "daily",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed(RateLimitStatus),
    Denied {
        scope: LimitScope,
        status: RateLimitStatus,
    },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    minute: Window,
    hour: Window,
    day: Window,
}

fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive() + Duration::days(1);
    tomorrow
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            minute: Window {
                count: 0,
                resets_at: now + Duration::seconds(60),
            },
            hour: Window {
                count: 0,
                resets_at: now + Duration::seconds(3600),
            },
            day: Window {
                count: 0,
                resets_at: next_utc_midnight(now),
            },
        }
    }

    fn roll_windows(&mut self, now: DateTime<Utc>) {
        if now >= self.minute.resets_at {
            self.minute.count = 0;
            self.minute.resets_at = now + Duration::seconds(60);
        }
        if now >= self.hour.resets_at {
            self.hour.count = 0;
            self.hour.resets_at = now + Duration::seconds(3600);
        }
        if now >= self.day.resets_at {
            self.day.count = 0;
            self.day.resets_at = next_utc_midnight(now);
        }
    }

    fn status(&self) -> RateLimitStatus {
        RateLimitStatus {
            per_minute: WindowStatus {
                used: self.minute.count,
                max: self.config.per_minute,
                resets_at: self.minute.resets_at,
            },
            per_hour: WindowStatus {
                used: self.hour.count,
                max: self.config.per_hour,
                resets_at: self.hour.resets_at,
            },
            per_day: WindowStatus {
                used: self.day.count,
                max: self.config.per_day,
                resets_at: self.day.resets_at,
            },
        }
    }

    /// Consumes one call if every window has room, otherwise reports the
    /// first exhausted scope (day, then hour, then minute).
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> RateLimitDecision {
        self.roll_windows(now);

        if self.day.count >= self.config.per_day {
            return RateLimitDecision::Denied {
                scope: LimitScope::Day,
                status: self.status(),
            };
        }
        if self.hour.count >= self.config.per_hour {
            return RateLimitDecision::Denied {
                scope: LimitScope::Hour,
                status: self.status(),
            };
        }
        if self.minute.count >= self.config.per_minute {
            return RateLimitDecision::Denied {
                scope: LimitScope::Minute,
                status: self.status(),
            };
        }

        self.minute.count += 1;
        self.hour.count += 1;
        self.day.count += 1;

        RateLimitDecision::Allowed(self.status())
    }

    /// Current usage without consuming a call.
    pub fn snapshot(&mut self, now: DateTime<Utc>) -> RateLimitStatus {
        self.roll_windows(now);
        self.status()
    }

    /// Clears all counters, restarting every window from `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = RateLimiter::new(self.config, now);
    }
}
