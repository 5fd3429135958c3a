//! Configuration system for symdex.
//!
//! Loads the first config found, in order:
//! 1. `--config <file>`
//! 2. Per-corpus: `<root>/symdex.toml`
//! 3. Global: `~/.config/symdex/config.toml`
//!
//! Example symdex.toml:
//! ```toml
//! [corpus]
//! symbols_dir = "symbols"
//! raw_dir = "cache/meta"
//! unavailable_file = "404"
//!
//! [rules]
//! exempt_path_prefixes = ["kernel"]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use symdex_inflate::{Corpus, InflateRules, UnavailableSet};

/// Corpus layout, relative to the corpus root unless absolute.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Stubs, overwritten in place by normalized records.
    pub symbols_dir: PathBuf,
    /// Raw metadata documents from the fetch stage.
    pub raw_dir: PathBuf,
    /// Newline-delimited known-unavailable path prefixes.
    pub unavailable_file: PathBuf,
    /// Packed archive of normalized records.
    pub archive: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            symbols_dir: PathBuf::from("symbols"),
            raw_dir: PathBuf::from("cache/meta"),
            unavailable_file: PathBuf::from("404"),
            archive: PathBuf::from("symbols.zip"),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SymdexConfig {
    pub corpus: CorpusConfig,
    pub rules: InflateRules,
}

impl SymdexConfig {
    /// Load configuration for a corpus root.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let project = root.join("symdex.toml");
        if project.is_file() {
            return Self::load_file(&project);
        }
        if let Some(global) = Self::global_config_path().filter(|p| p.is_file()) {
            return Self::load_file(&global);
        }
        Ok(Self::default())
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("symdex").join("config.toml"))
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// The on-disk corpus rooted at `root`.
    pub fn corpus(&self, root: &Path) -> Corpus {
        Corpus::new(
            root.join(&self.corpus.symbols_dir),
            root.join(&self.corpus.raw_dir),
        )
    }

    pub fn archive_path(&self, root: &Path) -> PathBuf {
        root.join(&self.corpus.archive)
    }

    /// Load the known-unavailable set. A missing file means an empty set.
    pub fn unavailable(&self, root: &Path) -> anyhow::Result<UnavailableSet> {
        let path = root.join(&self.corpus.unavailable_file);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no known-unavailable list");
            return Ok(UnavailableSet::default());
        }
        let set = UnavailableSet::load(&path)?;
        tracing::debug!(prefixes = set.len(), "loaded known-unavailable list");
        Ok(set)
    }
}
