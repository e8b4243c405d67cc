/// Crate-wide result alias.
pub type FryResult<T> = Result<T, FryError>;

/// Errors surfaced by the deepfry pipeline and its boundaries.
#[derive(thiserror::Error, Debug)]
pub enum FryError {
    /// Invalid caller input (dimensions, buffer lengths, option values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Input bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output surface could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A pass failed while rendering a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Anything else, with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FryError {
    /// Build a [`FryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FryError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FryError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FryError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
