//! Error types for statistical analysis

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by the analyzer and insights generator.
///
/// Degenerate samples (zero variance, too few points for a moment, zero
/// MAD) are never reported here; they resolve to neutral values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Unsupported outlier detection method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Statistical error: {0}")]
    Statistical(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let error = AnalysisError::InsufficientData {
            required: 4,
            actual: 2,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 4 points, got 2"
        );
    }

    #[test]
    fn test_unsupported_method_message() {
        let error = AnalysisError::UnsupportedMethod("dbscan".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported outlier detection method: dbscan"
        );
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisError>();
    }
}
