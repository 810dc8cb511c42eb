use crate::domain::completion::{
    CompletionChoice, CompletionParams, CompletionResponse, LanguageModel,
};
use crate::domain::error::DomainResult;
use crate::infrastructure::error::InfrastructureError;
use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::sampling::LlamaSampler;
use std::any::Any;
use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use tracing::{debug, instrument};

/// Window of recent tokens the repetition penalty looks at.
const PENALTY_LAST_N: i32 = 64;
/// Seed for the final distribution sampler.
const SAMPLER_SEED: u32 = 1234;

/// Local GGUF inference via llama.cpp.
///
/// Model weights are loaded once at construction. Every `complete` call runs
/// in a fresh context so consecutive rows cannot share KV-cache state.
pub struct LlamaCpp {
    backend: LlamaBackend,
    model: LlamaModel,
    n_ctx: u32,
}

impl fmt::Debug for LlamaCpp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlamaCpp")
            .field("n_ctx", &self.n_ctx)
            .finish()
    }
}

impl LlamaCpp {
    /// Load a GGUF model file with a fixed context window.
    ///
    /// llama.cpp's backend may only be initialized once per process, so at
    /// most one `LlamaCpp` can be constructed.
    #[instrument(skip(model_path))]
    pub fn load(model_path: &Path, n_ctx: u32) -> DomainResult<Self> {
        debug!("Loading GGUF model from {:?}", model_path);

        let backend = LlamaBackend::init().map_err(|e| {
            InfrastructureError::Inference(format!("llama.cpp backend init failed: {}", e))
        })?;

        let model_params = LlamaModelParams::default();
        let model = LlamaModel::load_from_file(&backend, model_path, &model_params)
            .map_err(|e| InfrastructureError::ModelHub(format!("Model load failed: {}", e)))?;

        Ok(Self {
            backend,
            model,
            n_ctx,
        })
    }

    fn sampler(&self, params: &CompletionParams) -> LlamaSampler {
        LlamaSampler::chain_simple([
            LlamaSampler::penalties(PENALTY_LAST_N, params.repeat_penalty, 0.0, 0.0),
            LlamaSampler::top_k(params.top_k),
            LlamaSampler::top_p(params.top_p, 1),
            LlamaSampler::temp(params.temperature),
            LlamaSampler::dist(SAMPLER_SEED),
        ])
    }
}

impl LanguageModel for LlamaCpp {
    #[instrument(skip(self, prompt))]
    fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> DomainResult<CompletionResponse> {
        let ctx_params = LlamaContextParams::default().with_n_ctx(NonZeroU32::new(self.n_ctx));
        let mut ctx = self
            .model
            .new_context(&self.backend, ctx_params)
            .map_err(|e| {
                InfrastructureError::Inference(format!("Context creation failed: {}", e))
            })?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Always)
            .map_err(|e| {
                InfrastructureError::Inference(format!("Prompt tokenization failed: {}", e))
            })?;

        let n_prompt = tokens.len() as i32;
        if n_prompt >= self.n_ctx as i32 {
            return Err(InfrastructureError::Inference(format!(
                "Prompt of {} tokens exceeds context window of {}",
                n_prompt, self.n_ctx
            ))
            .into());
        }

        // Total token budget, capped by the context window.
        let n_len = std::cmp::min(self.n_ctx as i32, n_prompt + params.max_tokens as i32);
        debug!("Decoding up to {} tokens ({} prompt)", n_len, n_prompt);

        let mut batch = LlamaBatch::new(self.n_ctx as usize, 1);
        let last_index = n_prompt - 1;
        for (i, token) in (0_i32..).zip(tokens.into_iter()) {
            batch
                .add(token, i, &[0], i == last_index)
                .map_err(|e| InfrastructureError::Inference(format!("Batch add failed: {}", e)))?;
        }
        ctx.decode(&mut batch)
            .map_err(|e| InfrastructureError::Inference(format!("Prompt decode failed: {}", e)))?;

        let mut sampler = self.sampler(params);
        let mut generated: Vec<u8> = Vec::new();
        let mut n_cur = batch.n_tokens();

        while n_cur < n_len {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);

            if self.model.is_eog_token(token) {
                break;
            }

            let bytes = self
                .model
                .token_to_bytes(token, Special::Tokenize)
                .map_err(|e| {
                    InfrastructureError::Inference(format!("Token detokenization failed: {}", e))
                })?;
            generated.extend_from_slice(&bytes);

            batch.clear();
            batch
                .add(token, n_cur, &[0], true)
                .map_err(|e| InfrastructureError::Inference(format!("Batch add failed: {}", e)))?;
            n_cur += 1;

            ctx.decode(&mut batch)
                .map_err(|e| InfrastructureError::Inference(format!("Decode failed: {}", e)))?;
        }

        // Generated tokens only; the prompt is not echoed back.
        let text = String::from_utf8_lossy(&generated).into_owned();
        Ok(CompletionResponse {
            choices: vec![CompletionChoice { text }],
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
