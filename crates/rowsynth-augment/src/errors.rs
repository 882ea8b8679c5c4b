use thiserror::Error;

/// Errors emitted by the augmentation engine.
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("verification failed: {0}")]
    Verification(String),
}
