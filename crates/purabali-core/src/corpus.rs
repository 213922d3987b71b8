//! Corpus construction: records in, deduplicated retrievable fragments out.
//!
//! Built once at process start; the resulting parallel arrays are immutable
//! afterwards. Dedup is by content hash of the normalized (trimmed,
//! lowercased) text, first occurrence wins — so the output is sensitive to
//! record iteration order, which callers are expected to keep stable.

use std::collections::HashSet;
use std::hash::Hasher;

use tracing::debug;
use twox_hash::XxHash64;

use crate::types::{FragmentKind, FragmentMeta, Record};

/// Parallel arrays of fragment text and metadata, indexed 0..len.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub texts: Vec<String>,
    pub metadata: Vec<FragmentMeta>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[derive(Default)]
pub struct CorpusBuilder;

impl CorpusBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Candidate fragments for one record, in fixed order. The intro is
    /// unconditional; every record yields at least that one fragment.
    pub fn fragments(&self, record: &Record) -> Vec<(FragmentKind, String)> {
        let mut out = Vec::with_capacity(4);
        out.push((
            FragmentKind::Intro,
            format!(
                "{} adalah pura jenis {} yang berada di Kabupaten {}.",
                record.nama, record.jenis, record.kabupaten
            ),
        ));
        if let Some(deskripsi) = populated(&record.deskripsi_singkat) {
            out.push((FragmentKind::Deskripsi, format!("Deskripsi: {deskripsi}")));
        }
        if let Some(tahun) = populated(&record.tahun_berdiri) {
            out.push((
                FragmentKind::Sejarah,
                format!("Pura ini diperkirakan berdiri pada {tahun}."),
            ));
        }
        if let Some(link) = populated(&record.link_lokasi) {
            out.push((FragmentKind::Lokasi, format!("Lokasi Google Maps: {link}")));
        }
        out
    }

    /// Build the full corpus from the record set, dropping any fragment
    /// whose normalized text was already seen by an earlier record or
    /// fragment in this build.
    pub fn build(&self, records: &[Record]) -> Corpus {
        let mut seen = HashSet::new();
        let mut corpus = Corpus::default();
        let mut dropped = 0usize;
        for record in records {
            for (kind, text) in self.fragments(record) {
                if !seen.insert(content_hash(&text)) {
                    dropped += 1;
                    continue;
                }
                corpus.metadata.push(FragmentMeta {
                    record_id: record.id.clone(),
                    nama: record.nama.clone(),
                    jenis: record.jenis.clone(),
                    kabupaten: record.kabupaten.clone(),
                    kind,
                    text: text.clone(),
                });
                corpus.texts.push(text);
            }
        }
        debug!(
            records = records.len(),
            fragments = corpus.len(),
            dropped,
            "corpus built"
        );
        corpus
    }
}

fn populated(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn content_hash(text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(text.trim().to_lowercase().as_bytes());
    hasher.finish()
}
