// src/functions/embeddings.rs
use crate::domain::embedding::{cosine_similarity, parse_embedding, Embedder};
use crate::domain::error::{DomainError, DomainResult};
use crate::functions::signature::{ColumnDef, ColumnType, Signature};
use crate::functions::{ScalarFunction, Value};
use ndarray::Array1;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sentinel returned when the reference vector parses to an empty list.
const EMPTY_EMBEDDING_SENTINEL: f32 = -1.0;

const INPUTS: &[ColumnDef] = &[
    ColumnDef {
        name: "prompt",
        dtype: ColumnType::Str,
    },
    ColumnDef {
        name: "embeddings",
        dtype: ColumnType::Str,
    },
];

const OUTPUTS: &[ColumnDef] = &[ColumnDef {
    name: "distance",
    dtype: ColumnType::Float32,
}];

/// Scores a precomputed, string-encoded embedding against the embedding of
/// a prompt fetched from the embedding API.
///
/// The prompt embedding is memoized between rows: the API is only called
/// when the prompt differs from the previous row's. Rows with the same
/// prompt (the common case when scanning a table against one query) cost a
/// single API call.
pub struct Embeddings {
    embedder: Arc<dyn Embedder>,
    last_prompt: Option<String>,
    last_embedding: Array1<f32>,
}

impl Embeddings {
    pub const NAME: &'static str = "Embeddings";

    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            last_prompt: None,
            last_embedding: Array1::zeros(0),
        }
    }

    fn prompt_embedding(&mut self, prompt: &str) -> DomainResult<&Array1<f32>> {
        if self.last_prompt.as_deref() != Some(prompt) {
            debug!("Prompt changed, fetching embedding");
            let embedding = self.embedder.embed(prompt)?.ok_or_else(|| {
                DomainError::CannotFetchEmbedding(
                    "embedding service returned no data".to_string(),
                )
            })?;
            self.last_embedding = Array1::from(embedding);
            self.last_prompt = Some(prompt.to_string());
        }
        Ok(&self.last_embedding)
    }
}

impl ScalarFunction for Embeddings {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn signature(&self) -> Signature {
        Signature {
            inputs: INPUTS,
            outputs: OUTPUTS,
        }
    }

    #[instrument(skip(self, row))]
    fn forward(&mut self, row: &[&str]) -> DomainResult<Value> {
        let &[prompt, encoded] = row else {
            return Err(DomainError::InvalidArity {
                expected: INPUTS.len(),
                actual: row.len(),
            });
        };

        let reference = parse_embedding(encoded)?;
        if reference.is_empty() {
            debug!("Empty reference vector, returning sentinel");
            return Ok(Value::Float32(EMPTY_EMBEDDING_SENTINEL));
        }
        let reference = Array1::from(reference);

        let document = self.prompt_embedding(prompt)?;
        if document.len() != reference.len() {
            return Err(DomainError::InvalidEmbedding(format!(
                "dimension mismatch: reference has {} elements, prompt embedding {}",
                reference.len(),
                document.len()
            )));
        }

        Ok(Value::Float32(cosine_similarity(&reference, document)))
    }
}
