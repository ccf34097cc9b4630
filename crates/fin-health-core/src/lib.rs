pub mod analysis;
pub mod assessment;
pub mod error;
pub mod glossary;
pub mod locale;
pub mod ratios;
pub mod record;
pub mod scoring;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

pub use analysis::{analyze, AnalysisOptions, HealthReport};
pub use assessment::{AnalysisContext, AssessmentResult, ModuleKind};
pub use error::FinHealthError;
pub use locale::Locale;
pub use ratios::{compute_ratios, RatioName, RatioSet};
pub use record::{Field, FinancialRecord};
pub use types::*;

/// Standard result type for all fin-health operations
pub type FinHealthResult<T> = Result<T, FinHealthError>;
