// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid embedding vector: {0}")]
    InvalidEmbedding(String),

    #[error("Cannot fetch embedding: {0}")]
    CannotFetchEmbedding(String),

    #[error("Model load failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    #[error("Invalid row arity: expected {expected}, got {actual}")]
    InvalidArity { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Prefix an error with call-site context while keeping the variant
    /// where it carries a message.
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::InvalidEmbedding(msg) => {
                DomainError::InvalidEmbedding(format!("{}: {}", context.into(), msg))
            }
            DomainError::CannotFetchEmbedding(msg) => {
                DomainError::CannotFetchEmbedding(format!("{}: {}", context.into(), msg))
            }
            DomainError::ModelLoadFailed(msg) => {
                DomainError::ModelLoadFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::InferenceFailed(msg) => {
                DomainError::InferenceFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => {
                DomainError::Other(format!("{}: {}", context.into(), msg))
            }
            err => DomainError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}
