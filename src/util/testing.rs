// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tracing::debug;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

/// Guards one-time test initialization.
static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes the global test environment exactly once: sets up logging.
pub fn init_test_env() {
    TEST_ENV.get_or_init(setup_test_logging);
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "debug");
    }

    // Silence spammy modules
    let noisy_modules = ["reqwest", "hyper_util", "mio", "want", "ureq", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Saves the env vars this crate reads and restores them on drop, so tests
/// that mutate the environment cannot leak into each other.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    openai_api_key: Option<String>,
    openai_url: Option<String>,
    openai_model: Option<String>,
    llama_repo_id: Option<String>,
    llama_model_file: Option<String>,
    llama_n_ctx: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_url: env::var("EVA_OPENAI_URL").ok(),
            openai_model: env::var("EVA_OPENAI_MODEL").ok(),
            llama_repo_id: env::var("EVA_LLAMA_REPO_ID").ok(),
            llama_model_file: env::var("EVA_LLAMA_MODEL_FILE").ok(),
            llama_n_ctx: env::var("EVA_LLAMA_N_CTX").ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        let saved = [
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("EVA_OPENAI_URL", &self.openai_url),
            ("EVA_OPENAI_MODEL", &self.openai_model),
            ("EVA_LLAMA_REPO_ID", &self.llama_repo_id),
            ("EVA_LLAMA_MODEL_FILE", &self.llama_model_file),
            ("EVA_LLAMA_N_CTX", &self.llama_n_ctx),
        ];
        for (key, value) in saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}
