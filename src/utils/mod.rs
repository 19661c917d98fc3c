pub mod error;
pub mod logger;
pub mod rate_limit;
pub mod validation;
