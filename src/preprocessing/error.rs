//! Error types for preprocessing operations.

use std::fmt;

/// Error type for preprocessing operations.
#[derive(Debug)]
pub enum PreprocessingError {
    /// Input matrix is unusable: no features, no samples, or ragged rows.
    InvalidInput(String),
    /// Fitted state does not match the data, or nothing has been fitted yet
    /// (`expected_features` is `None`).
    StateMismatch {
        expected_features: Option<usize>,
        got_features: usize,
    },
    /// Persisted parameters are inconsistent.
    InvalidParameter(String),
    /// A value cannot be represented in the backend's element type.
    NumericalError(String),
    /// Serialization or deserialization error.
    SerializationError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessingError::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            PreprocessingError::StateMismatch {
                expected_features: None,
                got_features,
            } => {
                write!(
                    f,
                    "State mismatch: transformer has not been fitted (got {} features)",
                    got_features
                )
            }
            PreprocessingError::StateMismatch {
                expected_features: Some(expected),
                got_features,
            } => {
                write!(
                    f,
                    "State mismatch: fitted on {} features, got {}",
                    expected, got_features
                )
            }
            PreprocessingError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            PreprocessingError::NumericalError(msg) => {
                write!(f, "Numerical error: {}", msg)
            }
            PreprocessingError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PreprocessingError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}
