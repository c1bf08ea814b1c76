//! Logging setup
//!
//! Library code only emits `tracing` events. Binaries install a subscriber
//! once at startup with [`init_logging`]. Events always go to stderr so that
//! stdout carries command output only.

use std::io::{self, IsTerminal};

use cmslink_domain::{impl_wire_name_conversions, CmsError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_wire_name_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `filter` when set and valid. Output is
/// written to stderr, coloured only when stderr is a terminal.
///
/// # Errors
/// Returns `CmsError::Config` for an invalid filter directive and
/// `CmsError::Internal` when a global subscriber is already installed.
pub fn init_logging(filter: &str, format: LogFormat) -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .map_err(|e| CmsError::Config(format!("Invalid log filter '{filter}': {e}")))?;

    let ansi = io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter_layer);
    let installed = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(io::stderr).with_ansi(ansi).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .flatten_event(true),
            )
            .try_init(),
    };
    installed.map_err(|e| CmsError::Internal(format!("Logging already initialized: {e}")))?;

    tracing::debug!(filter = %filter, format = %format, "Logging initialized");
    Ok(())
}

/// Install a test-writer subscriber. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}
