use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Corpus or embedding setup failed; the whole retrieval subsystem is
    /// unusable. There is no fragment-level partial success.
    #[error("search engine not initialized: {0}")]
    Construction(String),

    /// Embedding one query failed. Only this request fails; the corpus and
    /// index stay usable for subsequent requests.
    #[error("failed to embed query: {0}")]
    QueryEmbedding(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
