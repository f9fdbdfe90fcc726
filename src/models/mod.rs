//! Embedding model management

pub mod manager;

pub use manager::{EmbeddingModelInfo, EmbeddingModelManager};
