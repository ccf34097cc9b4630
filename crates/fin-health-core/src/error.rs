use thiserror::Error;

/// Input-side failures.
///
/// None of these abort an analysis: the record keeps (or resets to) the
/// field default and the error travels back to the caller as a warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinHealthError {
    #[error("Unknown field: '{0}' is not a recognised financial field")]
    UnknownField(String),

    #[error("Invalid number for {field}: '{value}' (default kept)")]
    InvalidNumber { field: String, value: String },

    #[error("Non-finite value for {field} (default kept)")]
    NonFiniteValue { field: String },

    #[error("Malformed series for {field}: {reason} (reset to 0, 0, 0)")]
    MalformedSeries { field: String, reason: String },
}
