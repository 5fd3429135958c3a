//! Archive packing command.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::config::SymdexConfig;

pub fn cmd_pack(root: &Path, config: &SymdexConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let symbols_dir = root.join(&config.corpus.symbols_dir);
    let archive = output.unwrap_or_else(|| config.archive_path(root));
    let count = symdex_archive::pack(&symbols_dir, &archive)
        .with_context(|| format!("packing {}", symbols_dir.display()))?;
    println!("Packed {count} records into {}", archive.display());
    Ok(())
}
