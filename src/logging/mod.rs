//! Logging for the VeRi loader
//!
//! This module provides:
//! - Bracketed event formatting with the active span path
//! - stderr logging, plus a timestamped log file when a directory is given

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::{log_file_name, setup_logging};
