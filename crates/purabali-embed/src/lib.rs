//! Asymmetric text embedding for the retrieval corpus.
//!
//! Documents and queries are embedded with distinct textual prefixes before
//! hitting the underlying model; the two vector spaces are not
//! interchangeable, so the prefixes are private and the only public entry
//! points are `embed_documents` / `embed_query`.

use anyhow::{anyhow, Result};

pub use purabali_core::traits::TextEncoder;

mod device;
mod encoder;
mod hash;
mod pool;

pub use encoder::E5Encoder;
pub use hash::HashEncoder;

const DOCUMENT_PREFIX: &str = "Dokumen: ";
const QUERY_PREFIX: &str = "Pertanyaan: ";

/// Wraps a [`TextEncoder`] with the document/query prefix discipline.
pub struct AsymmetricEmbedder {
    encoder: Box<dyn TextEncoder>,
}

impl AsymmetricEmbedder {
    pub fn new(encoder: Box<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    pub fn dim(&self) -> usize {
        self.encoder.dim()
    }

    /// Embed corpus texts. Fails the whole batch on any encoder error.
    pub fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let prefixed: Vec<String> = texts
            .iter()
            .map(|t| format!("{DOCUMENT_PREFIX}{t}"))
            .collect();
        self.encoder.encode_batch(&prefixed)
    }

    /// Embed one query.
    pub fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let batch = self.encoder.encode_batch(&[format!("{QUERY_PREFIX}{text}")])?;
        batch
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("encoder returned no vector for query"))
    }
}

/// Default embedder: the E5 model, or the deterministic hash encoder when
/// `APP_USE_FAKE_EMBEDDINGS` is set (tests, offline development).
pub fn default_embedder() -> Result<AsymmetricEmbedder> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using hash encoder (APP_USE_FAKE_EMBEDDINGS)");
        return Ok(AsymmetricEmbedder::new(Box::new(HashEncoder::new(
            encoder::EMBED_DIM,
        ))));
    }
    Ok(AsymmetricEmbedder::new(Box::new(E5Encoder::new()?)))
}
