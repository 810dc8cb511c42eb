// src/functions/mod.rs
pub mod embeddings;
pub mod eva_llama;
pub mod signature;

pub use embeddings::Embeddings;
pub use eva_llama::EvaLlama;

use crate::config::Settings;
use crate::domain::error::{DomainError, DomainResult};
use crate::functions::signature::Signature;
use crate::infrastructure::embeddings::OpenAiEmbedding;
use crate::infrastructure::llm::{fetch_model, LlamaCpp};
use std::sync::Arc;
use tracing::instrument;

/// One output cell produced by a scalar function.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Float32(f32),
}

/// A scalar user-defined function the host engine drives row by row.
///
/// `forward` takes `&mut self` because a function may keep per-instance
/// state between rows (e.g. the last-prompt embedding cache). The host
/// engine owns batching and never shares one instance across threads.
pub trait ScalarFunction: Send {
    /// Name the host engine discovers the function by.
    fn name(&self) -> &'static str;
    /// Declared input/output columns.
    fn signature(&self) -> Signature;
    /// Process one row of string-typed input columns into one output cell.
    fn forward(&mut self, row: &[&str]) -> DomainResult<Value>;
}

/// Names of all registered functions.
pub const FUNCTION_NAMES: &[&str] = &[Embeddings::NAME, EvaLlama::NAME];

/// Instantiate a registered function by name using default settings.
///
/// Construction loads the backing provider: `EvaLlama` downloads the model
/// artifact (unless cached) and loads the weights, which takes a while.
#[instrument]
pub fn create_function(name: &str) -> DomainResult<Box<dyn ScalarFunction>> {
    let settings = crate::config::load_settings()?;
    create_function_with_settings(name, &settings)
}

/// Instantiate a registered function by name with explicit settings.
#[instrument(skip(settings))]
pub fn create_function_with_settings(
    name: &str,
    settings: &Settings,
) -> DomainResult<Box<dyn ScalarFunction>> {
    match name {
        Embeddings::NAME => {
            let embedder = Arc::new(OpenAiEmbedding::new(
                settings.openai.url.clone(),
                settings.openai.model.clone(),
            ));
            Ok(Box::new(Embeddings::new(embedder)))
        }
        EvaLlama::NAME => {
            let model_path = fetch_model(&settings.llama.repo_id, &settings.llama.model_file)?;
            let llm = Arc::new(LlamaCpp::load(&model_path, settings.llama.n_ctx)?);
            Ok(Box::new(EvaLlama::new(llm)))
        }
        other => Err(DomainError::FunctionNotFound(format!(
            "{} (registered: {})",
            other,
            FUNCTION_NAMES.join(", ")
        ))),
    }
}
