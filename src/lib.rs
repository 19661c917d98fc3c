pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod generation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ServiceConfig;

pub use app::{StudyEngine, StudyFigures, StudyKind, StudyReport, StudyRequest};
pub use domain::model::Person;
pub use domain::ports::AnalysisGenerator;
pub use generation::{Analysis, GeneratorConfig, OpenAiClient};
pub use utils::error::{NumeraError, Result};
pub use utils::rate_limit::{RateLimitConfig, RateLimiter};
