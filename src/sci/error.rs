use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SciError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SciError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

pub type SciResult<T> = std::result::Result<T, SciError>;
