pub mod hub;
pub mod llama_provider;

pub use hub::fetch_model;
pub use llama_provider::LlamaCpp;
