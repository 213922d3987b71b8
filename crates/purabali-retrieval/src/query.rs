//! Substring-based query analysis over known vocabularies.

use purabali_core::traits::QueryAnalyzer;
use purabali_core::types::{QueryFilter, Record};

/// Keywords that signal the user wants an exhaustive category listing.
const LIST_KEYWORDS: [&str; 5] = ["daftar", "list", "semua", "apa saja", "sebutkan"];

/// Case-insensitive containment matching of category (`jenis`) and region
/// (`kabupaten`) names against the query text.
///
/// When several names match, the last one in vocabulary order wins for both
/// fields — that is the policy the production system shipped with, kept
/// deliberately and pinned by tests rather than silently "fixed". Swap the
/// whole analyzer behind [`QueryAnalyzer`] for anything smarter.
pub struct KeywordAnalyzer {
    jenis_list: Vec<String>,
    kabupaten_list: Vec<String>,
}

impl KeywordAnalyzer {
    pub fn new(jenis_list: Vec<String>, kabupaten_list: Vec<String>) -> Self {
        Self {
            jenis_list,
            kabupaten_list,
        }
    }

    /// Vocabularies taken from the records themselves, distinct values in
    /// first-seen order. Works with an empty record set: no filter will
    /// ever match and list mode never triggers.
    pub fn from_records(records: &[Record]) -> Self {
        let mut jenis_list: Vec<String> = Vec::new();
        let mut kabupaten_list: Vec<String> = Vec::new();
        for r in records {
            if !jenis_list.contains(&r.jenis) {
                jenis_list.push(r.jenis.clone());
            }
            if !kabupaten_list.contains(&r.kabupaten) {
                kabupaten_list.push(r.kabupaten.clone());
            }
        }
        Self::new(jenis_list, kabupaten_list)
    }

    /// The catalog vocabularies the production deployment used.
    pub fn default_vocab() -> Self {
        let jenis = [
            "Dang Kahyangan",
            "Kahyangan Jagat",
            "Pura Beji",
            "Pura Gunung",
            "Pura Melanting",
            "Pura Puseh",
            "Pura Segara",
            "Pura Sejarah",
            "Pura Taman",
            "Sad Kahyangan",
        ];
        let kabupaten = [
            "Badung",
            "Bangli",
            "Buleleng",
            "Denpasar",
            "Gianyar",
            "Jembrana",
            "Karangasem",
            "Klungkung",
            "Tabanan",
        ];
        Self::new(
            jenis.iter().map(ToString::to_string).collect(),
            kabupaten.iter().map(ToString::to_string).collect(),
        )
    }
}

impl QueryAnalyzer for KeywordAnalyzer {
    fn detect_filter(&self, query: &str) -> QueryFilter {
        let query = query.to_lowercase();
        let mut filter = QueryFilter::default();
        for kabupaten in &self.kabupaten_list {
            if query.contains(&kabupaten.to_lowercase()) {
                filter.kabupaten = Some(kabupaten.clone());
            }
        }
        for jenis in &self.jenis_list {
            if query.contains(&jenis.to_lowercase()) {
                filter.jenis = Some(jenis.clone());
            }
        }
        filter
    }

    fn is_list_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        LIST_KEYWORDS.iter().any(|kw| query.contains(kw))
    }

    fn extract_category(&self, query: &str) -> Option<String> {
        let query = query.to_lowercase();
        self.jenis_list
            .iter()
            .find(|jenis| query.contains(&jenis.to_lowercase()))
            .cloned()
    }
}
