//! Process-wide log output for an ETL run.
//!
//! Verbosity comes from `run_options.debug_mode` alone; `RUST_LOG` is not read.
//! [`init`] installs the subscriber once and returns a [`LogHandle`] that is
//! passed to the orchestrator, so later components learn the configured level
//! from the handle instead of probing global state.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Verbosity chosen for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHandle {
    debug: bool,
}

impl LogHandle {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Most verbose level that will be emitted.
    pub fn level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }
}

/// Build the subscriber for `handle` without installing it.
///
/// Output: stderr, compact format, ANSI colors only on a terminal.
pub fn subscriber(handle: LogHandle) -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::new(handle.level().to_string());

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .compact(),
    )
}

/// Install the process-wide subscriber.
///
/// Fails if a global subscriber is already set; the first configuration wins.
pub fn init(debug: bool) -> Result<LogHandle> {
    let handle = LogHandle::new(debug);
    subscriber(handle)
        .try_init()
        .context("initialize logging")?;
    tracing::debug!(level = %handle.level(), "logging initialized");
    Ok(handle)
}
