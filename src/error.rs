use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Failures that abort a conversion. No partial output is produced for any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no input data provided")]
    InputMissing,
    #[error("no data points found in input")]
    NoDataFound,
    #[error("frequency line {freq} is incomplete: expected {expected} values, found {found}")]
    IncompleteRecord {
        freq: String,
        expected: usize,
        found: usize,
    },
    #[error("no complete record available to detect ordering (each record needs {expected} values)")]
    IncompleteForDetection { expected: usize },
    #[error("invalid port count {nports}")]
    InvalidPortCount { nports: usize },
    #[error("port {port} out of range for a {nports}-port network")]
    PortOutOfRange { port: usize, nports: usize },
    #[error("value '{token}' could not be read as a number")]
    InvalidNumber { token: String },
}
