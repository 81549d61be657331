//! Error handling for duckchunk

use crate::types::type_id::TypeId;
use thiserror::Error;

/// Main error type for type construction, chunk access and value conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuckChunkError {
    /// Caller-supplied arguments violate an invariant. Raised before anything is allocated.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A variant-specific accessor or a value of the wrong kind was used on a type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: TypeId },

    #[error("{what} index {index} out of range (size: {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Buffer contents or external input that cannot be decoded
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias for duckchunk operations
pub type DuckChunkResult<T> = std::result::Result<T, DuckChunkError>;

impl DuckChunkError {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: TypeId) -> Self {
        DuckChunkError::TypeMismatch {
            expected: expected.into(),
            actual,
        }
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        DuckChunkError::IndexOutOfRange { what, index, len }
    }
}

/// Macro for creating invalid parameter errors
#[macro_export]
macro_rules! invalid_param {
    ($msg:expr) => {
        $crate::common::error::DuckChunkError::InvalidParameter($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::DuckChunkError::InvalidParameter(format!($fmt, $($arg)*))
    };
}

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! invalid_value {
    ($msg:expr) => {
        $crate::common::error::DuckChunkError::InvalidValue($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::DuckChunkError::InvalidValue(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DuckChunkError::mismatch("DECIMAL", TypeId::Integer);
        assert_eq!(
            err.to_string(),
            "Type mismatch: expected DECIMAL, got INTEGER"
        );

        let err = DuckChunkError::out_of_range("column", 3, 2);
        assert_eq!(err.to_string(), "column index 3 out of range (size: 2)");

        let err = invalid_param!("scale {} exceeds width {}", 5, 4);
        assert_eq!(
            err,
            DuckChunkError::InvalidParameter("scale 5 exceeds width 4".to_string())
        );
    }
}
