//! Archive lookup command.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::config::SymdexConfig;

/// Print every record at or below `path` as a JSON array.
pub fn cmd_lookup(
    root: &Path,
    config: &SymdexConfig,
    path: &str,
    archive: Option<PathBuf>,
) -> anyhow::Result<()> {
    let archive = archive.unwrap_or_else(|| config.archive_path(root));
    let records = symdex_archive::lookup(&archive, path)
        .with_context(|| format!("looking up {path} in {}", archive.display()))?;
    tracing::debug!(path, matches = records.len(), "lookup");
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
