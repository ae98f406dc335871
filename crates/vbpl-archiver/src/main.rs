//! vbpl-archiver — entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vbpl_archiver::cli;
use vbpl_archiver::config::ArchiverConfig;

#[derive(Parser)]
#[command(
    name = "vbpl-archiver",
    about = "Archive legal documents, their metadata and original PDFs from vbpl.vn",
    version,
    after_help = "Run with no command to perform a full archiving run."
)]
struct Cli {
    /// Archive root containing demuc/ (env: VBPL_ROOT).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Chromium/Chrome binary (env: VBPL_CHROMIUM_PATH).
    #[arg(long, global = true)]
    chromium: Option<PathBuf>,

    /// Seconds to wait for page content before saving what has loaded.
    #[arg(long, global = true)]
    render_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output results as JSON (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest ItemIDs from demuc/ and fetch every artifact (default).
    Run {
        /// Process at most this many ItemIDs.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the ItemIDs found in demuc/ without fetching anything.
    Harvest,
    /// Check Chromium and the archive layout.
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ArchiverConfig::resolve(cli.root, cli.chromium, cli.render_timeout);
    tracing::debug!("config: {config:?}");

    let result = match cli.command.unwrap_or(Commands::Run { limit: None }) {
        Commands::Run { limit } => cli::run_cmd::run(&config, limit, cli.json).await,
        Commands::Harvest => cli::harvest_cmd::run(&config, cli.json).await,
        Commands::Doctor => cli::doctor::run(&config).await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
