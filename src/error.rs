use thiserror::Error;

/// Errors produced while constructing update messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The payload of an [UpdateState](crate::UpdateState) cannot be
    /// applied, for example an empty sequence of transformers.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, Error>;
