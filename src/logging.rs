// SPDX-License-Identifier: MPL-2.0
//! Logging setup for the `folio_lens` binary.
//!
//! Library code only emits `tracing` events; this module installs the
//! subscriber. Output goes to stderr so command output on stdout stays
//! clean for piping.

use crate::app::config::DEFAULT_LOG_LEVEL;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Picks the filter directive: `RUST_LOG`, then `configured`, then `warn`.
///
/// Returns `None` when `RUST_LOG` is set, meaning the environment wins.
fn configured_directive(configured: Option<&str>) -> Option<String> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return None;
    }
    Some(
        configured
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string(),
    )
}

fn build_filter(configured: Option<&str>) -> EnvFilter {
    match configured_directive(configured) {
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        Some(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid log level {directive:?} ({err}), using {DEFAULT_LOG_LEVEL}");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        }),
    }
}

/// Installs the global subscriber.
///
/// Calling it again is harmless: the second subscriber is discarded.
pub fn init(level: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let installed = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("logging initialized");
    }
}
