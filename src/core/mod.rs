pub mod date;
pub mod name;
pub mod numbers;
pub mod reduce;
pub mod studies;

pub use crate::domain::model::{
    Compatibility, Forecast, LifePathBreakdown, NameBreakdown, Person, PersonalYear, Profile,
};
pub use crate::domain::ports::AnalysisGenerator;
pub use crate::utils::error::Result;
