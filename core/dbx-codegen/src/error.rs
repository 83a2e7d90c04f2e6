//! Error types for DBX code generation.
//!
//! All public APIs return `CodegenResult<T>`; library code does not panic.

use thiserror::Error;

/// Unified error type for all code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// No eval method of the function accepts the operand types
    #[error("cannot resolve eval method of '{function}': {message}")]
    Resolution { function: String, message: String },

    /// No converter exists between a logical type and a runtime class
    #[error("conversion error for {data_type}: {message}")]
    Conversion { data_type: String, message: String },

    /// Operands and resolved parameters are not aligned
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Literal value cannot be folded into its external representation
    #[error("literal error: {0}")]
    Literal(String),

    /// Arrow type has no logical type counterpart
    #[error("arrow error: {0}")]
    Arrow(String),

    /// Invalid configuration value
    #[error("config error: {0}")]
    Config(String),

    /// Standard I/O error
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for all code generation operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::Serialization(err.to_string())
    }
}

impl CodegenError {
    pub(crate) fn conversion(data_type: impl ToString, message: impl Into<String>) -> Self {
        CodegenError::Conversion {
            data_type: data_type.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_resolution() {
        let err = CodegenError::Resolution {
            function: "my_udf".to_string(),
            message: "no method accepts (INT, STRING)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve eval method of 'my_udf': no method accepts (INT, STRING)"
        );
    }

    #[test]
    fn error_display_arity() {
        let err = CodegenError::ArityMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "argument count mismatch: expected 2, got 3");
    }

    #[test]
    fn error_display_conversion() {
        let err = CodegenError::conversion("MAP<INT, INT>", "no external class");
        assert!(err.to_string().contains("MAP<INT, INT>"));
        assert!(err.to_string().contains("no external class"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: CodegenError = json_err.into();
        assert!(matches!(err, CodegenError::Serialization(_)));
    }

    #[test]
    fn codegen_result_err() {
        let result: CodegenResult<i32> = Err(CodegenError::Literal("bad".into()));
        assert!(result.is_err());
    }
}
