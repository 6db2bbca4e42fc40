use thiserror::Error;

/// Errors raised for caller configuration mistakes.
///
/// Data-quality problems (non-coercible values, constraint violations) are
/// never surfaced here; they end up in masks and diagnostic messages.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Unsupported conversion target passed to `mask_nonconvertible`
    #[error("Invalid 'to_datatype': {0}. Supported: numeric, datetime")]
    InvalidTargetKind(String),

    /// Unsupported projection kind requested from a validator
    #[error("Invalid 'return_type': {0}. Supported: mask_series, mask_frame, values")]
    InvalidReturnType(String),

    /// Unsupported character case constraint
    #[error("Invalid 'case': {0}. Supported: lower, upper, title")]
    InvalidCaseStyle(String),

    /// The configured pattern does not compile (byte patterns are rejected)
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// An Arrow kernel produced an error (e.g., mask length mismatch)
    #[error("Arrow computation error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
}
