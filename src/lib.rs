//! Backend of the PrognosCore marketing site.
//! Stores status checks, contact form submissions and newsletter signups in a document store.

pub mod app;
pub mod config;
pub mod database;
mod error;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "prognoscore=info,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Human readable, compact logs for development.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(env_filter())
        .compact()
        .init();
}

/// JSON logs, one object per line.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(env_filter())
        .init();
}
