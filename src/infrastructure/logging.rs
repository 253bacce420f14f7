//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over the verbosity flag;
//! `DULICH_LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count: 0 = warn, 1 = info, 2+ = debug
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dulich={}", level_for_verbosity(verbosity))));
    let registry = tracing_subscriber::registry().with(filter);

    let log_format = std::env::var("DULICH_LOG_FORMAT").unwrap_or_default();
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
