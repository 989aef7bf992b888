use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a value exceeds its fixed width.
    #[error("{field} is {len} bytes, at most {max} allowed")]
    TooLong {
        /// Field name that is too long.
        field: &'static str,
        /// Actual length in bytes.
        len: usize,
        /// Maximum length in bytes.
        max: usize,
    },
    /// When a hex-encoded value has the wrong width.
    #[error("{field} must be {expected} bytes, got {actual}")]
    WrongLength {
        /// Field name with the wrong width.
        field: &'static str,
        /// Expected width in bytes.
        expected: usize,
        /// Actual width in bytes.
        actual: usize,
    },
}
