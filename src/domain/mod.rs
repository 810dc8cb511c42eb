pub mod completion;
pub mod embedding;
pub mod error;
