use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use purabali_core::config::{expand_path, Config, SearchConfig};
use purabali_core::types::{Record, SearchResult};
use purabali_embed::default_embedder;
use purabali_retrieval::{prompt::grounding_prompt, KeywordAnalyzer, RetrievalEngine};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <query|prompt|repl> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "query" => {
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: purabali-cli query \"<query>\" [top_k]");
                std::process::exit(1)
            });
            let search = SearchConfig::from_config(&config);
            let top_k = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(search.default_top_k);
            let engine = build_engine(&config, search)?;
            let results = engine.retrieve(&query, top_k)?;
            print_results(&results);
        }
        "prompt" => {
            // Render the grounding prompt the generation model would receive.
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: purabali-cli prompt \"<query>\"");
                std::process::exit(1)
            });
            let search = SearchConfig::from_config(&config);
            let top_k = search.default_top_k;
            let engine = build_engine(&config, search)?;
            let results = engine.retrieve(&query, top_k)?;
            println!("{}", grounding_prompt(&query, &results));
        }
        "repl" => {
            let search = SearchConfig::from_config(&config);
            let top_k = search.default_top_k;
            let engine = build_engine(&config, search)?;
            println!("Ketik pertanyaan (kosong untuk keluar):");
            let stdin = io::stdin();
            loop {
                print!("> ");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let query = line.trim();
                if query.is_empty() {
                    break;
                }
                match engine.retrieve(query, top_k) {
                    Ok(results) => print_results(&results),
                    Err(e) => eprintln!("query failed: {e}"),
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn load_records(config: &Config) -> anyhow::Result<Vec<Record>> {
    let path: String = config
        .get("data.records_json")
        .unwrap_or_else(|_| "data/pura.json".to_string());
    let path = expand_path(&path);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading catalog export {}", path.display()))?;
    let records: Vec<Record> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    println!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn build_engine(config: &Config, search: SearchConfig) -> anyhow::Result<RetrievalEngine> {
    let records = load_records(config)?;
    let embedder = default_embedder()?;
    let analyzer = Box::new(KeywordAnalyzer::from_records(&records));

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Embedding corpus from {} records...", records.len()));
    pb.enable_steady_tick(Duration::from_millis(120));
    let engine = RetrievalEngine::build(&records, embedder, analyzer, search)?;
    pb.finish_with_message(format!("Corpus ready: {} fragments", engine.corpus_len()));
    Ok(engine)
}

fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("(no results)");
        return;
    }
    for (rank, r) in results.iter().enumerate() {
        println!(
            "{:>2}. [{:.4}] ({}) {}: {}",
            rank + 1,
            r.score,
            r.meta.kind.as_str(),
            r.meta.nama,
            r.text
        );
    }
}
