//! Logging setup for hosts embedding the engine

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{Error, Result};

/// Install a tracing subscriber that prints compact logs to stdout.
///
/// The level comes from `RUST_LOG`, defaulting to `info`. Fails if a global
/// subscriber is already set.
pub fn init() -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}
