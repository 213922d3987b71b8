use crate::types::QueryFilter;

/// Maps raw text to fixed-dimension, L2-normalized vectors.
///
/// Implementations must be deterministic for a given input and must fail the
/// whole batch on error; callers never get partial results.
pub trait TextEncoder: Send + Sync {
    fn dim(&self) -> usize;
    fn encode_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Surface-text query analysis: soft filters and list intent.
///
/// Kept behind a trait so the substring heuristics can be swapped for a real
/// tokenizer or classifier without touching the retrieval orchestration.
pub trait QueryAnalyzer: Send + Sync {
    fn detect_filter(&self, query: &str) -> QueryFilter;
    fn is_list_query(&self, query: &str) -> bool;
    fn extract_category(&self, query: &str) -> Option<String>;
}
