//! Diagnostic logging
//!
//! The viewer owns the terminal in raw mode, so there is no console layer.
//! Events go to `<config dir>/logs/etail.log` with daily rotation.
//!
//! Filtering follows `RUST_LOG` when set, otherwise `logging.level` from the
//! configuration:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=etail_table=debug` - load and reload events only

use etail_config::LoggingConfig;
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "etail.log";

/// Install the file subscriber, if file logging is enabled
pub fn init(config: &LoggingConfig) {
    if !config.file {
        return;
    }

    let logs_dir = match etail_config::logs_dir() {
        Some(dir) => dir,
        None => {
            eprintln!("Warning: Could not locate a config directory, logging disabled");
            return;
        }
    };
    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!(
            "Warning: Could not create {}, logging disabled: {}",
            logs_dir.display(),
            e
        );
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}
