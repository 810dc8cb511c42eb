// src/functions/eva_llama.rs
use crate::domain::completion::{CompletionParams, LanguageModel};
use crate::domain::error::{DomainError, DomainResult};
use crate::functions::signature::{ColumnDef, ColumnType, Signature};
use crate::functions::{ScalarFunction, Value};
use std::sync::Arc;
use tracing::instrument;

/// CodeLlama model converted to GGUF for use with llama.cpp.
pub const MODEL_REPO_ID: &str = "TheBloke/CodeLlama-13B-GGUF";
pub const MODEL_BASENAME: &str = "codellama-13b.Q5_0.gguf";
pub const CONTEXT_WINDOW: u32 = 2048;

/// Fixed decoding parameters, applied to every row.
const DECODING: CompletionParams = CompletionParams {
    max_tokens: 3000,
    temperature: 0.5,
    top_p: 0.95,
    top_k: 150,
    repeat_penalty: 1.2,
};

const INPUTS: &[ColumnDef] = &[
    ColumnDef {
        name: "prompt",
        dtype: ColumnType::Str,
    },
    ColumnDef {
        name: "text",
        dtype: ColumnType::Str,
    },
];

const OUTPUTS: &[ColumnDef] = &[ColumnDef {
    name: "response",
    dtype: ColumnType::Str,
}];

/// Template provided to the model.
fn template(prompt: &str, context: &str) -> String {
    format!(
        "\nSYSTEM: You are a helpful assistant that accomplishes user tasks.\n\n\
         CONTEXT: {context}\n\n\
         USER: {prompt}\n\n\
         ASSISTANT: \n"
    )
}

/// Chat completion against a locally loaded language model.
///
/// Each row's prompt and context are substituted into a fixed template and
/// decoded with fixed parameters. No retry, streaming, or cancellation.
pub struct EvaLlama {
    llm: Arc<dyn LanguageModel>,
}

impl EvaLlama {
    pub const NAME: &'static str = "EvaLlama";

    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

impl ScalarFunction for EvaLlama {
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
        let &[prompt, text] = row else {
            return Err(DomainError::InvalidArity {
                expected: INPUTS.len(),
                actual: row.len(),
            });
        };

        let response = self.llm.complete(&template(prompt, text), &DECODING)?;

        let answer = response
            .choices
            .first()
            .map(|choice| choice.text.clone())
            .ok_or_else(|| {
                DomainError::InferenceFailed("model returned no choices".to_string())
            })?;

        Ok(Value::Str(answer))
    }
}
