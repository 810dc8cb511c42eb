// src/config.rs
use crate::domain::error::DomainResult;
use crate::functions::eva_llama;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{instrument, trace};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiSettings {
    /// Base URL of the embedding API (default: "https://api.openai.com")
    #[serde(default = "default_openai_url")]
    pub url: String,

    /// Embedding model identifier (default: "text-embedding-ada-002")
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "text-embedding-ada-002".to_string()
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            url: default_openai_url(),
            model: default_openai_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlamaSettings {
    /// Model repository on the Hugging Face hub
    #[serde(default = "default_llama_repo_id")]
    pub repo_id: String,

    /// GGUF artifact file name within the repository
    #[serde(default = "default_llama_model_file")]
    pub model_file: String,

    /// Context window the model is loaded with
    #[serde(default = "default_llama_n_ctx")]
    pub n_ctx: u32,
}

fn default_llama_repo_id() -> String {
    eva_llama::MODEL_REPO_ID.to_string()
}

fn default_llama_model_file() -> String {
    eva_llama::MODEL_BASENAME.to_string()
}

fn default_llama_n_ctx() -> u32 {
    eva_llama::CONTEXT_WINDOW
}

impl Default for LlamaSettings {
    fn default() -> Self {
        Self {
            repo_id: default_llama_repo_id(),
            model_file: default_llama_model_file(),
            n_ctx: default_llama_n_ctx(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Embedding API settings
    #[serde(default)]
    pub openai: OpenAiSettings,

    /// Local inference settings
    #[serde(default)]
    pub llama: LlamaSettings,
}

// Load settings from config files and environment variables
#[instrument(level = "debug")]
pub fn load_settings() -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = Settings::default();

    // Check for a config file in the standard location
    let config_sources = [dirs::home_dir().map(|p| p.join(".config/eva-functions/config.toml"))];

    for config_path in config_sources.iter().flatten() {
        if config_path.exists() {
            trace!("Loading config from: {:?}", config_path);
            settings = load_settings_from(config_path).unwrap_or(settings);
        }
    }

    apply_env_overrides(&mut settings);

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

fn load_settings_from(path: &Path) -> Option<Settings> {
    let config_text = std::fs::read_to_string(path).ok()?;
    toml::from_str::<Settings>(&config_text).ok()
}

// Override with environment variables
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var("EVA_OPENAI_URL") {
        trace!("Using EVA_OPENAI_URL from environment: {}", url);
        settings.openai.url = url;
    }
    if let Ok(model) = std::env::var("EVA_OPENAI_MODEL") {
        trace!("Using EVA_OPENAI_MODEL from environment: {}", model);
        settings.openai.model = model;
    }
    if let Ok(repo_id) = std::env::var("EVA_LLAMA_REPO_ID") {
        trace!("Using EVA_LLAMA_REPO_ID from environment: {}", repo_id);
        settings.llama.repo_id = repo_id;
    }
    if let Ok(model_file) = std::env::var("EVA_LLAMA_MODEL_FILE") {
        trace!("Using EVA_LLAMA_MODEL_FILE from environment: {}", model_file);
        settings.llama.model_file = model_file;
    }
    if let Ok(n_ctx) = std::env::var("EVA_LLAMA_N_CTX") {
        if let Ok(n_ctx) = n_ctx.parse::<u32>() {
            trace!("Using EVA_LLAMA_N_CTX from environment: {}", n_ctx);
            settings.llama.n_ctx = n_ctx;
        }
    }
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
