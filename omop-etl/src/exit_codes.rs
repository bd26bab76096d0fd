//! Stable exit codes for the ETL command.

/// The ETL run completed.
pub const OK: i32 = 0;
/// Configuration, logging, orchestrator construction, or the run itself failed.
pub const FAILURE: i32 = 1;
/// Invalid invocation (missing `--config`, path not a readable file). Matches clap's usage code.
pub const USAGE: i32 = 2;
