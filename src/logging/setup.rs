use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// `veri_loader_<timestamp>.log`
pub fn log_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("veri_loader_{}.log", timestamp)
}

/// Install the global subscriber.
///
/// Events go to stderr so stdout stays free for the statistics table.
/// `RUST_LOG` overrides `default_filter`. With `log_dir`, events are also
/// written to a new timestamped file there.
///
/// # Arguments
/// * `log_dir` - Directory for the log file, created if missing
/// * `default_filter` - Filter directive used when `RUST_LOG` is unset
///
/// # Returns
/// * `Ok(Some(path))` with the log file path when `log_dir` is given
/// * `Err` if the file can't be created or a subscriber is already set
pub fn setup_logging(log_dir: Option<&Path>, default_filter: &str) -> io::Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Console output, with colors
    let stderr_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stderr);

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            // Create log file with timestamp
            fs::create_dir_all(dir)?;
            let log_path = dir.join(log_file_name());
            let file = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_path)?;

            let layer = fmt::layer()
                .event_format(BracketedFormatter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false); // No ANSI colors in the file
            (Some(layer), Some(log_path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }
    Ok(log_path)
}
