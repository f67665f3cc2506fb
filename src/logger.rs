use std::{
    fs::{self, File},
    io,
    path::Path,
};

use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LoggerConfig, LoggerFormat};

pub fn init_logger(opts: LoggerConfig) {
    let stdio_filter = EnvFilter::new(opts.stdio_level.clone());
    let stdio_layer = match opts.format {
        LoggerFormat::Pretty => fmt::Layer::default().pretty().boxed(),
        LoggerFormat::Json => fmt::Layer::default().json().boxed(),
        LoggerFormat::Compact => fmt::Layer::default().compact().boxed(),
    }
    .with_filter(stdio_filter);

    let file_layer = match opts.log_file.as_deref().map(create_log_file) {
        Some(Ok(writer)) => {
            let filter = EnvFilter::new(opts.file_level.clone());
            Some(
                fmt::Layer::default()
                    .json()
                    .with_writer(writer)
                    .with_filter(filter),
            )
        }
        Some(Err(err)) => {
            eprintln!("Failed to create log file, logging to stdio only: {err}");
            None
        }
        None => None,
    };

    Registry::default()
        .with(stdio_layer)
        .with(file_layer)
        .init();
}

/// Truncates any log left over from a previous run.
fn create_log_file(log_file: &Path) -> io::Result<File> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(log_file)
}
