use thiserror::Error;

/// Precompile codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("nominate requires at least one validator")]
    EmptyValidatorList,

    #[error("malformed response: expected {expected} bytes, got {actual}")]
    MalformedResponse { expected: usize, actual: usize },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
