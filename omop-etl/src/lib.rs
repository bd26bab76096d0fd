//! Command-line bootstrap for an OMOP ETL run.
//!
//! A run is driven from a single YAML configuration file:
//!
//! - **[`io::config`]**: loads the file into a [`io::config::RunConfiguration`],
//!   validating the fields the bootstrap itself depends on.
//! - **[`logging`]**: installs the process-wide subscriber from
//!   `run_options.debug_mode`.
//! - **[`wrapper`]**: the [`wrapper::Orchestrator`] seam and the default
//!   step-based [`wrapper::Wrapper`].
//!
//! [`bootstrap`] ties these together in a fixed order; the binary turns its
//! result into an exit code.

pub mod bootstrap;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wrapper;
