// src/domain/completion.rs
use crate::domain::error::DomainResult;
use std::any::Any;

/// Decoding parameters handed through to the inference backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub repeat_penalty: f32,
}

/// One candidate completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionChoice {
    pub text: String,
}

/// Response structure of the inference backend: an ordered list of choices,
/// of which callers typically consume the first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}

/// Core trait for text completion against a loaded language model.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> DomainResult<CompletionResponse>;
    fn as_any(&self) -> &dyn Any; // for downcasting
}
