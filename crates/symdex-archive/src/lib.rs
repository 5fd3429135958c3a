//! Archive packaging and lookup for normalized symbols.
//!
//! `pack` zips the `symbols/` tree; `Archive::lookup` answers path and
//! subtree queries against it. Entry names are `symbols/<path>.json`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use symdex_core::Symbol;
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

/// Directory prefix of every entry in the archive.
pub const ENTRY_PREFIX: &str = "symbols/";

/// Archive result type
pub type Result<T> = std::result::Result<T, ArchiveError>;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid archive {}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid record {entry}")]
    Record {
        entry: String,
        #[source]
        source: serde_json::Error,
    },
}

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> ArchiveError + '_ {
    move |source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn zip_err(path: &Path) -> impl Fn(zip::result::ZipError) -> ArchiveError + '_ {
    move |source| ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    }
}

/// Zip every `*.json` record under `symbols_dir` into `archive`.
///
/// Entries are sorted by name. The archive is built in a temporary file next
/// to `archive` and renamed into place. Returns the number of entries.
pub fn pack(symbols_dir: &Path, archive: &Path) -> Result<usize> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(symbols_dir) {
        let entry = entry.map_err(|e| ArchiveError::Io {
            path: symbols_dir.to_path_buf(),
            source: e.into(),
        })?;
        let file = entry.path();
        if !entry.file_type().is_file() || file.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }
        let Ok(rel) = file.strip_prefix(symbols_dir) else {
            continue;
        };
        let name: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        entries.push((format!("{ENTRY_PREFIX}{}", name.join("/")), file.to_path_buf()));
    }
    entries.sort();

    let dir = match archive.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err(dir))?;
    let mut writer = zip::ZipWriter::new(tmp.reopen().map_err(io_err(tmp.path()))?);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, file) in &entries {
        let bytes = std::fs::read(file).map_err(io_err(file))?;
        writer.start_file(name.as_str(), options).map_err(zip_err(archive))?;
        writer.write_all(&bytes).map_err(io_err(archive))?;
    }
    writer.finish().map_err(zip_err(archive))?;
    set_archive_mode(tmp.as_file()).map_err(io_err(archive))?;
    tmp.persist(archive).map_err(|e| ArchiveError::Io {
        path: archive.to_path_buf(),
        source: e.error,
    })?;

    tracing::info!(entries = entries.len(), archive = %archive.display(), "packed");
    Ok(entries.len())
}

/// Temporary files are created owner-only; the archive is world-readable.
#[cfg(unix)]
fn set_archive_mode(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_archive_mode(_file: &File) -> std::io::Result<()> {
    Ok(())
}

/// An opened archive.
pub struct Archive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl Archive {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(io_err(path))?;
        let zip = ZipArchive::new(file).map_err(zip_err(path))?;
        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    pub fn len(&self) -> usize {
        self.zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zip.len() == 0
    }

    /// The record at `path` and every record below it, in reverse archive order.
    pub fn lookup(&mut self, path: &str) -> Result<Vec<Symbol>> {
        let path = path.trim_end_matches('/');
        let exact = format!("{path}.json");
        let subtree = format!("{path}/");

        let mut matches = Vec::new();
        for i in 0..self.zip.len() {
            let entry = self.zip.by_index(i).map_err(zip_err(&self.path))?;
            let name = entry.name();
            let rel = name.strip_prefix(ENTRY_PREFIX).unwrap_or(name);
            if entry.is_dir() || name.ends_with('/') {
                continue;
            }
            if rel == exact || rel.starts_with(&subtree) {
                matches.push(i);
            }
        }

        let mut records = Vec::with_capacity(matches.len());
        for i in matches.into_iter().rev() {
            let mut entry = self.zip.by_index(i).map_err(zip_err(&self.path))?;
            let mut content = Vec::new();
            entry.read_to_end(&mut content).map_err(io_err(&self.path))?;
            let record =
                serde_json::from_slice(&content).map_err(|source| ArchiveError::Record {
                    entry: entry.name().to_string(),
                    source,
                })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Open `archive` and look up `path`.
pub fn lookup(archive: &Path, path: &str) -> Result<Vec<Symbol>> {
    Archive::open(archive)?.lookup(path)
}
