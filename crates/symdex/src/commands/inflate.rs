//! Inflate command: normalize stubs into full symbol records.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use symdex_inflate::{Corpus, InflateError, Normalizer};

use crate::config::SymdexConfig;

#[derive(Args, Debug, Default)]
pub struct InflateArgs {
    /// Normalize only this symbol path and print the result instead of writing it
    pub path: Option<String>,

    /// Print the single-symbol result as JSON instead of a debug dump
    #[arg(long, requires = "path")]
    pub json: bool,

    /// Log failed symbols and continue instead of stopping at the first failure
    #[arg(long)]
    pub keep_going: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn cmd_inflate(root: &Path, config: &SymdexConfig, args: &InflateArgs) -> anyhow::Result<()> {
    let corpus = config.corpus(root);
    let unavailable = config.unavailable(root)?;
    let normalizer = Normalizer::new(&config.rules, &unavailable, &corpus);

    match &args.path {
        Some(path) => inflate_one(&corpus, &normalizer, path, args.json),
        None => inflate_all(&corpus, &normalizer, args),
    }
}

fn inflate_one(
    corpus: &Corpus,
    normalizer: &Normalizer<'_>,
    path: &str,
    json: bool,
) -> anyhow::Result<()> {
    let stub = corpus
        .load_stub(path)
        .with_context(|| format!("loading stub {path}"))?;
    let symbol = normalizer.normalize(stub, corpus)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&symbol)?);
    } else {
        println!("{symbol:#?}");
    }
    Ok(())
}

fn inflate_path(corpus: &Corpus, normalizer: &Normalizer<'_>, path: &str) -> Result<(), InflateError> {
    let stub = corpus.load_stub(path).map_err(|e| e.in_symbol(path))?;
    let record = normalizer.normalize(stub, corpus)?;
    corpus
        .write_record(&record)
        .map_err(|e| e.in_symbol(path))
}

fn inflate_all(corpus: &Corpus, normalizer: &Normalizer<'_>, args: &InflateArgs) -> anyhow::Result<()> {
    let paths = corpus
        .stub_paths()
        .with_context(|| format!("listing stubs in {}", corpus.symbols_dir().display()))?;
    tracing::info!(stubs = paths.len(), "inflating");

    let bar = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(paths.len() as u64)
    };
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let step = |path: &String| {
        let res = inflate_path(corpus, normalizer, path);
        bar.inc(1);
        res
    };

    if args.keep_going {
        let failures: Vec<InflateError> = paths
            .par_iter()
            .filter_map(|path| step(path).err())
            .collect();
        bar.finish_and_clear();
        for err in &failures {
            tracing::warn!("{}", error_chain(err));
        }
        if !failures.is_empty() {
            anyhow::bail!("{} of {} symbols failed", failures.len(), paths.len());
        }
    } else {
        let res = paths.par_iter().try_for_each(step);
        bar.finish_and_clear();
        res?;
    }

    tracing::info!(symbols = paths.len(), "inflated");
    Ok(())
}

/// `outer: inner: ...` for an error and its sources.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
