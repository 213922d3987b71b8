//! Grounding-prompt assembly for the answer-generation collaborator.
//!
//! The retrieval core only builds the string; calling the hosted model and
//! handling its response stays with the external layer.

use std::fmt::Write;

use purabali_core::types::SearchResult;

const SYSTEM_INSTRUCTION: &str = "Anda adalah seorang ahli di bidang pariwisata Bali. \
Anda akan membantu pengunjung untuk mengetahui informasi tentang tempat wisata di Bali. \
Anda akan memberikan informasi tentang tempat wisata di Bali yang relevan dengan pertanyaan pengunjung. \
Informasi yang Anda berikan harus sesuai dengan fakta yang ada di dalam database. \
Jangan memberikan informasi yang tidak sesuai dengan fakta yang ada di dalam database. \
Gunakan kalimat yang sopan dan profesional.\
Berikut ini merupakan database tempat wisata di Bali: \n";

/// Render the retrieved fragments into the prompt the generation model is
/// grounded on: instruction, one line per fragment, then the question.
pub fn grounding_prompt(query: &str, retrieved: &[SearchResult]) -> String {
    let mut docs = String::new();
    for (i, r) in retrieved.iter().enumerate() {
        if i > 0 {
            docs.push('\n');
        }
        let _ = write!(docs, "- [{}] {}: {}", r.meta.kind.as_str(), r.meta.nama, r.text);
    }
    format!("{SYSTEM_INSTRUCTION}{docs}\n\nPertanyaan: {query}\nJawaban:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use purabali_core::types::{FragmentKind, FragmentMeta};

    fn result(nama: &str, text: &str) -> SearchResult {
        SearchResult {
            score: 0.9,
            text: text.to_string(),
            meta: FragmentMeta {
                record_id: "1".into(),
                nama: nama.into(),
                jenis: "Pura Segara".into(),
                kabupaten: "Badung".into(),
                kind: FragmentKind::Intro,
                text: text.to_string(),
            },
        }
    }

    #[test]
    fn prompt_lists_each_fragment_once() {
        let retrieved = vec![
            result("Pura A", "Pura A adalah pura jenis Pura Segara."),
            result("Pura B", "Pura B adalah pura jenis Pura Segara."),
        ];
        let prompt = grounding_prompt("pura di badung", &retrieved);
        assert!(prompt.starts_with("Anda adalah seorang ahli"));
        assert!(prompt.contains("- [intro] Pura A: Pura A adalah pura jenis Pura Segara."));
        assert!(prompt.contains("- [intro] Pura B:"));
        assert!(prompt.ends_with("Pertanyaan: pura di badung\nJawaban:"));
    }

    #[test]
    fn prompt_with_no_results_still_asks_the_question() {
        let prompt = grounding_prompt("pura tertua?", &[]);
        assert!(prompt.contains("database tempat wisata di Bali"));
        assert!(prompt.ends_with("Pertanyaan: pura tertua?\nJawaban:"));
    }
}
