//! File-based tracing setup.
//!
//! The TUI owns the terminal, so logging is disabled unless the
//! `POINTCAST_LOG` env var names a file path. `RUST_LOG` filters as usual.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "POINTCAST_LOG";

pub fn init() {
    let Ok(path) = std::env::var(LOG_ENV_VAR) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pointcast=debug"));

    let Ok(file) = std::fs::File::create(&path) else {
        eprintln!("warning: failed to create log file: {}", path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
