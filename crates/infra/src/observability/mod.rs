//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! application's choice. [`init_tracing`] is a convenience for binaries and
//! tests that want the default output.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes. Safe to call more than once.
pub fn init_tracing(json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(fmt::layer().json().with_target(true).with_span_events(FmtSpan::CLOSE))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true).with_span_events(FmtSpan::CLOSE)).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(json, "tracing initialised");
            true
        }
        Err(_) => false,
    }
}
