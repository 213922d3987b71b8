use purabali_vector::{dot, FlatIpIndex};

fn index_with(vectors: Vec<Vec<f32>>) -> FlatIpIndex {
    let mut index = FlatIpIndex::new(vectors[0].len());
    index.add(vectors).expect("add");
    index
}

#[test]
fn search_returns_descending_scores() {
    let index = index_with(vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.6, 0.8],
    ]);
    let hits = index.search(&[1.0, 0.0], 3);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].0, 1);
    assert_eq!(hits[1].0, 2);
    assert_eq!(hits[2].0, 0);
    for pair in hits.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn ties_break_by_lower_corpus_index() {
    // Identical vectors score identically; stable sort keeps insertion order.
    let index = index_with(vec![
        vec![1.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 0.0],
    ]);
    let hits = index.search(&[1.0, 0.0], 3);
    let order: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn k_larger_than_index_returns_everything() {
    let index = index_with(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(index.search(&[1.0, 0.0], 10).len(), 2);
}

#[test]
fn k_zero_returns_nothing() {
    let index = index_with(vec![vec![1.0, 0.0]]);
    assert!(index.search(&[1.0, 0.0], 0).is_empty());
}

#[test]
fn empty_index_returns_nothing() {
    let index = FlatIpIndex::new(2);
    assert!(index.is_empty());
    assert!(index.search(&[1.0, 0.0], 5).is_empty());
}

#[test]
fn add_rejects_dimension_mismatch() {
    let mut index = FlatIpIndex::new(3);
    let err = index.add(vec![vec![1.0, 0.0]]).unwrap_err();
    assert!(err.to_string().contains("dimension"));
    assert_eq!(index.len(), 0, "nothing stored on failure");
}

#[test]
fn mismatched_query_yields_no_candidates() {
    let index = index_with(vec![vec![1.0, 0.0]]);
    assert!(index.search(&[1.0, 0.0, 0.0], 5).is_empty());
}

#[test]
fn stored_vectors_are_retrievable_for_rerank() {
    let index = index_with(vec![vec![0.6, 0.8]]);
    let v = index.vector(0).expect("vector 0");
    assert!((dot(v, &[0.6, 0.8]) - 1.0).abs() < 1e-6);
    assert!(index.vector(1).is_none());
}
