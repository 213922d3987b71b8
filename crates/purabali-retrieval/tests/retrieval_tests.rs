use purabali_core::config::SearchConfig;
use purabali_core::types::Record;
use purabali_embed::{AsymmetricEmbedder, HashEncoder};
use purabali_retrieval::{KeywordAnalyzer, RetrievalEngine};

fn record(id: &str, nama: &str, jenis: &str, kabupaten: &str) -> Record {
    Record {
        id: id.to_string(),
        nama: nama.to_string(),
        jenis: jenis.to_string(),
        kabupaten: kabupaten.to_string(),
        deskripsi_singkat: None,
        tahun_berdiri: None,
        link_lokasi: None,
    }
}

/// Small three-temple catalog shared by the behavioral tests below.
fn catalog() -> Vec<Record> {
    let mut r2 = record("2", "Pura B", "Pura Gunung", "Badung");
    r2.deskripsi_singkat = Some("Indah".to_string());
    vec![
        record("1", "Pura A", "Pura Segara", "Badung"),
        r2,
        record("3", "Pura C", "Pura Segara", "Gianyar"),
    ]
}

fn engine_for(records: &[Record]) -> RetrievalEngine {
    let embedder = AsymmetricEmbedder::new(Box::new(HashEncoder::new(256)));
    let analyzer = Box::new(KeywordAnalyzer::default_vocab());
    RetrievalEngine::build(records, embedder, analyzer, SearchConfig::default())
        .expect("engine build")
}

#[test]
fn region_filter_excludes_other_regions() {
    let engine = engine_for(&catalog());
    let results = engine.retrieve("pura di badung", 10).expect("retrieve");

    assert!(!results.is_empty());
    for r in &results {
        assert_eq!(r.meta.kabupaten, "Badung");
        assert_ne!(r.meta.record_id, "3", "Gianyar record must never appear");
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "scores must be non-increasing");
    }
}

#[test]
fn list_mode_returns_whole_category_in_corpus_order() {
    let engine = engine_for(&catalog());
    let results = engine.retrieve("daftar pura segara", 3).expect("retrieve");

    let ids: Vec<&str> = results.iter().map(|r| r.meta.record_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"], "corpus order, Pura Segara only");
    for r in &results {
        assert_eq!(r.meta.jenis, "Pura Segara");
        assert_eq!(r.score, 1.0, "list mode uses a placeholder score");
    }
}

#[test]
fn list_mode_is_capped() {
    let records: Vec<Record> = (0..40)
        .map(|i| record(&i.to_string(), &format!("Pura {i}"), "Pura Segara", "Badung"))
        .collect();
    let engine = engine_for(&records);
    let results = engine.retrieve("daftar pura segara", 3).expect("retrieve");
    assert_eq!(results.len(), 30);
}

#[test]
fn list_mode_with_unknown_category_falls_back_to_similarity() {
    // Vocabulary knows "Pura Beji" but the corpus has no such record, so the
    // list branch finds nothing and similarity mode answers with top_k = 10.
    let engine = engine_for(&catalog());
    let results = engine.retrieve("daftar pura beji", 3).expect("retrieve");

    assert!(!results.is_empty(), "fallback must still answer");
    assert!(results.len() <= 10);
    assert!(results.iter().any(|r| r.score < 1.0), "similarity scores, not placeholders");
}

#[test]
fn filter_that_matches_nothing_is_dropped() {
    // Tabanan is in the vocabulary but no record lives there; the filtered
    // pool is empty, so the unfiltered candidates must come back.
    let engine = engine_for(&catalog());
    let results = engine.retrieve("pura di tabanan", 3).expect("retrieve");
    assert!(!results.is_empty());
}

#[test]
fn empty_corpus_returns_empty_results() {
    let engine = engine_for(&[]);
    let results = engine.retrieve("pura di badung", 5).expect("retrieve");
    assert!(results.is_empty());
    assert_eq!(engine.corpus_len(), 0);
}

#[test]
fn result_count_is_bounded_by_top_k() {
    let engine = engine_for(&catalog());
    assert!(engine.retrieve("pura", 2).expect("retrieve").len() <= 2);
    assert!(engine.retrieve("pura", 0).expect("retrieve").is_empty());
}

#[test]
fn no_corpus_entry_appears_twice() {
    let engine = engine_for(&catalog());
    let results = engine.retrieve("pura indah di bali", 10).expect("retrieve");
    let mut texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    let before = texts.len();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(before, texts.len());
}

#[test]
fn results_carry_fragment_text_and_metadata() {
    let engine = engine_for(&catalog());
    let results = engine.retrieve("pura segara di badung", 1).expect("retrieve");
    assert_eq!(results.len(), 1);
    let top = &results[0];
    assert_eq!(top.text, top.meta.text);
    assert!(!top.meta.nama.is_empty());
}

#[test]
fn category_filter_is_sound_when_entries_exist() {
    let engine = engine_for(&catalog());
    // "pura gunung" names a category with one record; every survivor of the
    // filter must belong to it.
    let results = engine.retrieve("pura gunung", 10).expect("retrieve");
    assert!(!results.is_empty());
    for r in &results {
        assert_eq!(r.meta.jenis, "Pura Gunung");
    }
}

#[test]
fn analyzer_vocabulary_can_come_from_the_records() {
    let records = catalog();
    let embedder = AsymmetricEmbedder::new(Box::new(HashEncoder::new(256)));
    let analyzer = Box::new(KeywordAnalyzer::from_records(&records));
    let engine = RetrievalEngine::build(&records, embedder, analyzer, SearchConfig::default())
        .expect("engine build");

    let results = engine.retrieve("daftar pura segara", 3).expect("retrieve");
    assert_eq!(results.len(), 2);
}
