//! Domain types shared by the corpus builder, embedder and retrieval engine.

use serde::{Deserialize, Serialize};

pub type RecordId = String;

/// One catalog entity (a temple) as exported by the data store.
///
/// - `id`/`nama`/`jenis`/`kabupaten`: identity, category and region; always set
/// - `deskripsi_singkat`: short free-text description
/// - `tahun_berdiri`: founding year (kept textual, the catalog mixes formats)
/// - `link_lokasi`: Google Maps link
///
/// Each optional field backs exactly one conditional corpus fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub nama: String,
    pub jenis: String,
    pub kabupaten: String,
    #[serde(default)]
    pub deskripsi_singkat: Option<String>,
    #[serde(default)]
    pub tahun_berdiri: Option<String>,
    #[serde(default)]
    pub link_lokasi: Option<String>,
}

/// Which part of a record a fragment was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Intro,
    Deskripsi,
    Sejarah,
    Lokasi,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Intro => "intro",
            FragmentKind::Deskripsi => "deskripsi",
            FragmentKind::Sejarah => "sejarah",
            FragmentKind::Lokasi => "lokasi",
        }
    }
}

/// Metadata carried alongside every corpus entry, parallel to the text array.
/// `text` repeats the fragment verbatim so results are self-contained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentMeta {
    pub record_id: RecordId,
    pub nama: String,
    pub jenis: String,
    pub kabupaten: String,
    pub kind: FragmentKind,
    pub text: String,
}

/// Soft constraint inferred from a query's surface text.
/// An unset field means "unconstrained".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub jenis: Option<String>,
    pub kabupaten: Option<String>,
}

impl QueryFilter {
    pub fn is_empty(&self) -> bool {
        self.jenis.is_none() && self.kabupaten.is_none()
    }

    /// True when `meta` does not contradict any set field.
    pub fn allows(&self, meta: &FragmentMeta) -> bool {
        if let Some(jenis) = &self.jenis {
            if jenis != &meta.jenis {
                return false;
            }
        }
        if let Some(kabupaten) = &self.kabupaten {
            if kabupaten != &meta.kabupaten {
                return false;
            }
        }
        true
    }
}

/// One retrieved fragment, returned best-first. Higher score is better;
/// list-mode results carry a placeholder score of 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: f32,
    pub text: String,
    pub meta: FragmentMeta,
}
