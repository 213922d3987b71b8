//! Exact in-memory inner-product index.
//!
//! Brute force over every stored vector: at catalog scale (hundreds to low
//! thousands of fragments) a full scan is faster than building anything
//! smarter, and keeps the "exact nearest neighbor" guarantee the retrieval
//! layer tests against. Vectors are stored once at startup and read-only
//! afterwards.

use anyhow::{anyhow, Result};
use tracing::debug;

pub struct FlatIpIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
        }
    }

    /// Append vectors; insertion order defines the corpus index. Every
    /// vector must match the index dimension.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != self.dim {
                return Err(anyhow!(
                    "vector {} has dimension {} (index wants {})",
                    i,
                    v.len(),
                    self.dim
                ));
            }
        }
        self.vectors.extend(vectors);
        debug!(total = self.vectors.len(), "index populated");
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Stored vector by corpus index, for reranking.
    pub fn vector(&self, idx: usize) -> Option<&[f32]> {
        self.vectors.get(idx).map(Vec::as_slice)
    }

    /// Exact top-k by inner product: every stored vector is scored, results
    /// come back in descending score order, ties broken by ascending corpus
    /// index (the sort is stable). Returns fewer than `k` entries only when
    /// the index holds fewer.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if query.len() != self.dim {
            debug!(
                got = query.len(),
                want = self.dim,
                "query dimension mismatch, returning no candidates"
            );
            return Vec::new();
        }
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, dot(query, v)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Plain inner product; over unit-norm vectors this is cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
