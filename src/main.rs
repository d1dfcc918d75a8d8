use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use veri_loader::logging::setup_logging;
use veri_loader::{LoaderConfig, VeriDataset};

#[derive(Parser, Debug)]
#[command(author, version, about = "Load the VeRi dataset and report split statistics", long_about = None)]
struct Args {
    /// Directory containing the VeRi folder
    #[clap(long)]
    root: Option<PathBuf>,

    /// JSON loader config; defaults to the per-user config file if present
    #[clap(long)]
    config: Option<PathBuf>,

    /// Don't print the statistics table
    #[clap(long, short)]
    quiet: bool,

    /// Write split statistics as JSON to this file
    #[clap(long)]
    export: Option<PathBuf>,

    /// Include every record in the export
    #[clap(long, requires = "export")]
    with_records: bool,

    /// Also write logs to a timestamped file in this directory
    #[clap(long)]
    log_dir: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> anyhow::Result<LoaderConfig> {
    let mut config = match &args.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => match LoaderConfig::default_config_path() {
            Some(path) if path.exists() => LoaderConfig::from_file(&path)?,
            _ => {
                info!("No config file found. Using defaults.");
                LoaderConfig::default()
            }
        },
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if args.quiet {
        config.verbose = false;
    }
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let dataset = VeriDataset::load(&config)
        .with_context(|| format!("failed to load VeRi from {:?}", config.dataset_path()))?;

    if dataset.train().is_empty() {
        warn!("Training split is empty");
    }

    if let Some(path) = &args.export {
        dataset
            .export_summary(path, args.with_records)
            .with_context(|| format!("failed to export summary to {:?}", path))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // No subscriber yet, so this one goes straight to stderr
    if let Err(e) = setup_logging(args.log_dir.as_deref(), &args.log_level) {
        eprintln!("failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    // Errors are reported once, through the log
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
