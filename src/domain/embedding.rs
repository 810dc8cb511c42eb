// src/domain/embedding.rs
use crate::domain::error::{DomainError, DomainResult};
use ndarray::Array1;
use std::any::Any;
use tracing::instrument;

/// Core trait for text embedding functionality.
///
/// Extends `Any` via `as_any` so callers holding a `dyn Embedder` can
/// downcast to the concrete provider when they need to.
pub trait Embedder: Send + Sync {
    /// Embeds text into a vector of floats.
    ///
    /// `Ok(None)` means the provider had no embedding to offer (empty
    /// response); transport and protocol failures are errors.
    fn embed(&self, text: &str) -> DomainResult<Option<Vec<f32>>>;
    fn as_any(&self) -> &dyn Any; // for downcasting
}

/// Calculate cosine similarity between two vectors
#[instrument(skip_all)]
pub fn cosine_similarity(vec1: &Array1<f32>, vec2: &Array1<f32>) -> f32 {
    let dot_product = vec1.dot(vec2);
    let magnitude_vec1 = vec1.dot(vec1).sqrt();
    let magnitude_vec2 = vec2.dot(vec2).sqrt();

    if magnitude_vec1 == 0.0 || magnitude_vec2 == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_vec1 * magnitude_vec2)
}

/// Parse a string-encoded numeric vector such as `[0.1, 0.2, 0.3]`.
///
/// An empty list (`[]`) parses successfully; callers decide what an empty
/// vector means. Anything that is not a flat float array is an error.
#[instrument(skip_all)]
pub fn parse_embedding(raw: &str) -> DomainResult<Vec<f32>> {
    serde_json::from_str::<Vec<f32>>(raw.trim())
        .map_err(|e| DomainError::InvalidEmbedding(format!("cannot parse {:?}: {}", raw, e)))
}
