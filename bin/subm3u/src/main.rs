use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use sublist::{
    config::DEFAULT_CONFIG_FILE, generate::DEFAULT_RESOLVE_JOBS, Config, FsClient, Generator,
    PlaylistMode,
};

#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
struct Subm3uArgs {
    /// Configuration file listing the folders to export
    #[clap(short, long, env = "SUBM3U_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory the playlists are written to
    #[clap(short, long, default_value = ".")]
    output: PathBuf,

    /// Override the playlist mode of the configuration file. proxy or raw.
    #[clap(long)]
    mode: Option<PlaylistMode>,

    /// HTTP timeout, in seconds
    #[clap(short, long, default_value = "30")]
    timeout: u64,

    /// Raw url lookups running at once in raw mode
    #[clap(long, default_value_t = DEFAULT_RESOLVE_JOBS)]
    resolve_jobs: NonZeroUsize,

    /// Debug output
    #[clap(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Subm3uArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .try_from_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    if config.folders.is_empty() {
        log::warn!("No folder configured in {}.", args.config.display());
        return Ok(());
    }

    let client = FsClient::new(Duration::from_secs(args.timeout))?;
    let generator = Generator::from_config(client, &config)
        .output_dir(args.output.clone())
        .resolve_jobs(args.resolve_jobs);

    let (collection, written) = sublist::run(&config, &generator)
        .await
        .context("failed to write playlists")?;

    let failed: Vec<_> = collection.failures().collect();
    if !failed.is_empty() {
        log::error!("Failed to list {} folder(s):", failed.len());
        for (folder, e) in failed {
            log::error!("  - {} ({}{}): {e}", folder.name, folder.host, folder.path);
        }
    }
    log::info!(
        "{} playlist(s) written for {} folder(s).",
        written.len(),
        collection.len()
    );

    Ok(())
}
