use precompile_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum PwRokoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Nominate requires at least one validator")]
    EmptyValidatorList,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid network config: {0}")]
    Config(String),

    #[error("Wallet is on chain {actual:#x}, network expects {expected:#x}")]
    WrongChain { expected: u64, actual: u64 },

    #[error("Precompile call failed: {0}")]
    Transport(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),
}

impl From<CodecError> for PwRokoError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::InvalidArgument(msg) => PwRokoError::InvalidArgument(msg),
            CodecError::InvalidAddress(msg) => PwRokoError::InvalidAddress(msg),
            CodecError::EmptyValidatorList => PwRokoError::EmptyValidatorList,
            CodecError::MalformedResponse { expected, actual } => PwRokoError::MalformedResponse(
                format!("expected {expected} bytes, got {actual}"),
            ),
            CodecError::UnsupportedOperation(name) => PwRokoError::UnsupportedOperation(name),
        }
    }
}

impl From<serde_json::Error> for PwRokoError {
    fn from(e: serde_json::Error) -> Self {
        PwRokoError::Config(e.to_string())
    }
}
