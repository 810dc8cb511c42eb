pub mod embeddings;
pub mod error;
pub mod llm;
