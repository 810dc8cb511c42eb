use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Model hub error: {0}")]
    ModelHub(String),

    #[error("Inference error: {0}")]
    Inference(String),
}

// Implement conversion from infrastructure errors to domain errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Network(msg) => DomainError::CannotFetchEmbedding(msg),
            InfrastructureError::Serialization(msg) => DomainError::Other(msg),
            InfrastructureError::ModelHub(msg) => DomainError::ModelLoadFailed(msg),
            InfrastructureError::Inference(msg) => DomainError::InferenceFailed(msg),
        }
    }
}
