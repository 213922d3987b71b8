//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. Also holds the retrieval tunables whose defaults pin the behavior
//! the production system shipped with.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}

/// Retrieval tunables. The defaults are behavioral constants, not guesses:
/// a candidate pool of 10, list answers capped at 30, 3 results per answer.
/// Override via the `[search]` table in `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Nearest-neighbor pool fetched before filtering and reranking.
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
    /// Maximum entries returned by a category listing.
    #[serde(default = "default_list_cap")]
    pub list_cap: usize,
    /// `top_k` used when the caller does not specify one.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    /// `top_k` used when list mode finds no entry for its category.
    #[serde(default = "default_fallback_top_k")]
    pub fallback_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_pool: default_candidate_pool(),
            list_cap: default_list_cap(),
            default_top_k: default_top_k(),
            fallback_top_k: default_fallback_top_k(),
        }
    }
}

impl SearchConfig {
    /// Extract the `[search]` table, falling back to defaults when absent.
    pub fn from_config(config: &Config) -> Self {
        config.get("search").unwrap_or_default()
    }
}

fn default_candidate_pool() -> usize {
    10
}

fn default_list_cap() -> usize {
    30
}

fn default_top_k() -> usize {
    3
}

fn default_fallback_top_k() -> usize {
    10
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
