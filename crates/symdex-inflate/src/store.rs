//! Symbol and raw-document storage.
//!
//! The engine only depends on two read seams: [`SymbolStore`] for looking up
//! other symbols while resolving references, and [`RawSource`] for loading a
//! symbol's raw metadata document. [`Corpus`] is the on-disk layout the
//! upstream stages produce; [`MemoryStore`] backs tests and embedding.

use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use symdex_core::{Stub, Symbol};
use walkdir::WalkDir;

use crate::{InflateError, Result};

/// Read access to stubs and already-normalized records, keyed by path.
pub trait SymbolStore: Send + Sync {
    /// Look up the entry at `path`. Records and stubs both come back as a `Stub`.
    fn get(&self, path: &str) -> Option<Stub>;
}

/// Read access to raw metadata documents, keyed by path.
pub trait RawSource: Send + Sync {
    fn raw(&self, path: &str) -> Result<Value>;
}

/// In-memory store of stubs and raw documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stubs: HashMap<String, Stub>,
    raw: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_stub(&mut self, stub: Stub) {
        self.stubs.insert(stub.path.clone(), stub);
    }

    pub fn insert_raw(&mut self, path: impl Into<String>, doc: Value) {
        self.raw.insert(path.into(), doc);
    }

    pub fn with_stub(mut self, stub: Stub) -> Self {
        self.insert_stub(stub);
        self
    }

    pub fn with_raw(mut self, path: impl Into<String>, doc: Value) -> Self {
        self.insert_raw(path, doc);
        self
    }
}

impl SymbolStore for MemoryStore {
    fn get(&self, path: &str) -> Option<Stub> {
        self.stubs.get(path).cloned()
    }
}

impl RawSource for MemoryStore {
    fn raw(&self, path: &str) -> Result<Value> {
        self.raw
            .get(path)
            .cloned()
            .ok_or_else(|| InflateError::RawDocumentMissing(path.to_string()))
    }
}

/// On-disk corpus: `<symbols_dir>/<path>.json` stubs (overwritten by records)
/// and `<raw_dir>/<path>.json` raw documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    symbols_dir: PathBuf,
    raw_dir: PathBuf,
}

impl Corpus {
    pub fn new(symbols_dir: impl Into<PathBuf>, raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            symbols_dir: symbols_dir.into(),
            raw_dir: raw_dir.into(),
        }
    }

    pub fn symbols_dir(&self) -> &Path {
        &self.symbols_dir
    }

    pub fn symbol_file(&self, path: &str) -> PathBuf {
        self.symbols_dir.join(format!("{path}.json"))
    }

    pub fn raw_file(&self, path: &str) -> PathBuf {
        self.raw_dir.join(format!("{path}.json"))
    }

    /// All stub paths under the symbols directory, sorted.
    pub fn stub_paths(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.symbols_dir) {
            let entry = entry.map_err(|e| InflateError::Io {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.symbols_dir.clone()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if file.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(rel) = file.strip_prefix(&self.symbols_dir) else {
                continue;
            };
            let rel = rel.with_extension("");
            let parts: Vec<_> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            paths.push(parts.join("/"));
        }
        paths.sort();
        Ok(paths)
    }

    /// Load the stub (or previously written record) at `path`.
    pub fn load_stub(&self, path: &str) -> Result<Stub> {
        read_json(&self.symbol_file(path))
    }

    /// Replace the stub at `record.path` with `record`.
    ///
    /// The record is written to a temporary file in the same directory and
    /// renamed over the stub, so readers never observe a partial file.
    pub fn write_record(&self, record: &Symbol) -> Result<()> {
        let target = self.symbol_file(&record.path);
        let io_err = |source: std::io::Error| InflateError::Io {
            path: target.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(record).map_err(|source| InflateError::Json {
            path: target.clone(),
            source,
        })?;
        let dir = target.parent().unwrap_or(self.symbols_dir.as_path());
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        set_record_mode(tmp.as_file()).map_err(io_err)?;
        tmp.persist(&target).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

/// Temporary files are created owner-only; records are world-readable.
#[cfg(unix)]
fn set_record_mode(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_record_mode(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

impl SymbolStore for Corpus {
    fn get(&self, path: &str) -> Option<Stub> {
        self.load_stub(path).ok()
    }
}

impl RawSource for Corpus {
    fn raw(&self, path: &str) -> Result<Value> {
        let file = self.raw_file(path);
        if !file.is_file() {
            return Err(InflateError::RawDocumentMissing(path.to_string()));
        }
        read_json(&file)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read(path).map_err(|source| InflateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| InflateError::Json {
        path: path.to_path_buf(),
        source,
    })
}
