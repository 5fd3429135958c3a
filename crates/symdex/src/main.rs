use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::inflate::InflateArgs;
use config::SymdexConfig;

/// Normalize raw API documentation metadata into an offline symbol corpus.
#[derive(Parser)]
#[command(name = "symdex", version, about)]
struct Cli {
    /// Corpus root (contains symbols/, cache/meta/, 404)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <root>/symdex.toml, then ~/.config/symdex/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize every stub in place, or dump a single symbol without writing
    Inflate(InflateArgs),

    /// Pack normalized records into a zip archive
    Pack {
        /// Archive to write (defaults to the configured archive path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the record at a path and every record below it
    Lookup {
        /// Symbol path, e.g. appkit/nsview
        path: String,

        /// Archive to read (defaults to the configured archive path)
        #[arg(long)]
        archive: Option<PathBuf>,
    },
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function; this only restores the
    // default disposition for SIGPIPE.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "symdex=debug,symdex_inflate=debug,symdex_archive=debug"
    } else {
        "symdex=info,symdex_archive=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SymdexConfig::load(&cli.root, cli.config.as_deref())?;
    match cli.command {
        Command::Inflate(args) => commands::inflate::cmd_inflate(&cli.root, &config, &args),
        Command::Pack { output } => commands::pack::cmd_pack(&cli.root, &config, output),
        Command::Lookup { path, archive } => {
            commands::lookup::cmd_lookup(&cli.root, &config, &path, archive)
        }
    }
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
