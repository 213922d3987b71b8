//! Retrieval orchestration: query analysis, list mode, filtered similarity
//! search and reranking over the startup-built corpus.

pub mod engine;
pub mod prompt;
pub mod query;

pub use engine::RetrievalEngine;
pub use query::KeywordAnalyzer;
