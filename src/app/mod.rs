pub mod study;

pub use study::{StudyEngine, StudyFigures, StudyKind, StudyReport, StudyRequest};
