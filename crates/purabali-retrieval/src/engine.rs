//! The retrieval engine: built once at startup, immutable afterwards.

use std::cmp::Ordering;

use tracing::{debug, info};

use purabali_core::config::SearchConfig;
use purabali_core::corpus::{Corpus, CorpusBuilder};
use purabali_core::error::{Error, Result};
use purabali_core::traits::QueryAnalyzer;
use purabali_core::types::{Record, SearchResult};
use purabali_embed::AsymmetricEmbedder;
use purabali_vector::{dot, FlatIpIndex};

/// Corpus, document vectors and query analysis bundled behind the one public
/// entry point, [`RetrievalEngine::retrieve`]. Construct it once and share
/// it by reference; nothing mutates after `build`, so concurrent requests
/// need no locking.
pub struct RetrievalEngine {
    corpus: Corpus,
    index: FlatIpIndex,
    embedder: AsymmetricEmbedder,
    analyzer: Box<dyn QueryAnalyzer>,
    tuning: SearchConfig,
}

impl RetrievalEngine {
    /// Build the corpus, embed every fragment and populate the index.
    /// Any embedding failure here is fatal to the whole subsystem.
    pub fn build(
        records: &[Record],
        embedder: AsymmetricEmbedder,
        analyzer: Box<dyn QueryAnalyzer>,
        tuning: SearchConfig,
    ) -> Result<Self> {
        let corpus = CorpusBuilder::new().build(records);
        let mut index = FlatIpIndex::new(embedder.dim());
        if !corpus.is_empty() {
            let vectors = embedder
                .embed_documents(&corpus.texts)
                .map_err(|e| Error::Construction(e.to_string()))?;
            index
                .add(vectors)
                .map_err(|e| Error::Construction(e.to_string()))?;
        }
        info!(fragments = corpus.len(), "retrieval engine ready");
        Ok(Self {
            corpus,
            index,
            embedder,
            analyzer,
            tuning,
        })
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    /// Answer a query with at most `top_k` fragments, best first.
    ///
    /// List queries naming a known category return every fragment of that
    /// category in corpus order (capped, placeholder score 1.0) instead of a
    /// similarity ranking; everything else goes through the filtered
    /// similarity pipeline. An empty corpus yields an empty result, never an
    /// error.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.corpus.is_empty() {
            return Ok(Vec::new());
        }
        let query_vec = self
            .embedder
            .embed_query(query)
            .map_err(|e| Error::QueryEmbedding(e.to_string()))?;

        if self.analyzer.is_list_query(query) {
            if let Some(category) = self.analyzer.extract_category(query) {
                let listed = self.list_category(&category);
                if !listed.is_empty() {
                    debug!(%category, results = listed.len(), "list mode");
                    return Ok(listed);
                }
                debug!(%category, "list category empty, using similarity fallback");
                return Ok(self.similarity(query, &query_vec, self.tuning.fallback_top_k));
            }
        }
        Ok(self.similarity(query, &query_vec, top_k))
    }

    /// All corpus entries of `category`, corpus order, capped at the list
    /// limit. Presence in the category is the sole criterion; scores are a
    /// placeholder 1.0.
    fn list_category(&self, category: &str) -> Vec<SearchResult> {
        self.corpus
            .metadata
            .iter()
            .zip(&self.corpus.texts)
            .filter(|(meta, _)| meta.jenis == category)
            .take(self.tuning.list_cap)
            .map(|(meta, text)| SearchResult {
                score: 1.0,
                text: text.clone(),
                meta: meta.clone(),
            })
            .collect()
    }

    fn similarity(&self, query: &str, query_vec: &[f32], top_k: usize) -> Vec<SearchResult> {
        let pool = self.index.search(query_vec, self.tuning.candidate_pool);

        let filter = self.analyzer.detect_filter(query);
        let mut survivors: Vec<(usize, f32)> = if filter.is_empty() {
            pool.clone()
        } else {
            pool.iter()
                .copied()
                .filter(|(i, _)| filter.allows(&self.corpus.metadata[*i]))
                .collect()
        };
        if survivors.is_empty() {
            // A filter that kills every candidate is treated as a false
            // positive; fall back to the unfiltered pool.
            debug!(?filter, "filter eliminated every candidate, dropping it");
            survivors = pool;
        }

        // Re-score against the stored vectors rather than trusting the index
        // scores; this is what makes the final score explainable even if the
        // index is ever swapped for an approximate one.
        let mut reranked: Vec<(usize, f32)> = survivors
            .into_iter()
            .map(|(i, _)| {
                let score = self
                    .index
                    .vector(i)
                    .map(|v| dot(query_vec, v))
                    .unwrap_or(f32::MIN);
                (i, score)
            })
            .collect();
        reranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        reranked.truncate(top_k);

        reranked
            .into_iter()
            .map(|(i, score)| SearchResult {
                score,
                text: self.corpus.texts[i].clone(),
                meta: self.corpus.metadata[i].clone(),
            })
            .collect()
    }
}
