//! The four-step bootstrap: load configuration, initialize logging, build the
//! orchestrator, run it.
//!
//! Each step runs only if the previous one succeeded. Nothing is retried or
//! rolled back, and orchestrator errors are returned without added context so
//! the caller reports exactly what the pipeline raised.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::io::config::{RunConfiguration, load_config};
use crate::logging::{self, LogHandle};
use crate::wrapper::{Orchestrator, Wrapper};

/// Version of this ETL bootstrap, logged before every run.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the default [`Wrapper`] with process-wide logging.
pub fn run(config_path: &Path) -> Result<()> {
    run_with(config_path, logging::init, |config, log| {
        Ok(Wrapper::new(config, log))
    })
}

/// Run the bootstrap with a custom logging initializer and orchestrator factory.
///
/// `build` receives the configuration exactly as loaded; ownership moves into
/// the orchestrator.
pub fn run_with<L, B, O>(config_path: &Path, init_logging: L, build: B) -> Result<()>
where
    L: FnOnce(bool) -> Result<LogHandle>,
    B: FnOnce(RunConfiguration, &LogHandle) -> Result<O>,
    O: Orchestrator,
{
    let config = load_config(config_path)?;
    let log = init_logging(config.debug_mode())?;
    let mut etl = build(config, &log)?;

    info!("ETL version {VERSION}");

    etl.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::ConfigError;
    use crate::test_support::write_config;
    use std::cell::{Cell, RefCell};
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("vocabulary table missing")]
    struct VocabularyMissing;

    struct Recording<'a> {
        ran: &'a Cell<bool>,
        fail: bool,
    }

    impl Orchestrator for Recording<'_> {
        fn run(&mut self) -> Result<()> {
            self.ran.set(true);
            if self.fail {
                return Err(VocabularyMissing.into());
            }
            Ok(())
        }
    }

    #[test]
    fn runs_all_steps_with_loaded_configuration() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            temp.path(),
            "run_options:\n  debug_mode: false\ndatabase:\n  host: localhost\n",
        );
        let expected = load_config(&path).expect("load");

        let debug_seen = Cell::new(None);
        let received = RefCell::new(None);
        let ran = Cell::new(false);

        run_with(
            &path,
            |debug| {
                debug_seen.set(Some(debug));
                Ok(LogHandle::new(debug))
            },
            |config, log| {
                assert!(!log.is_debug());
                *received.borrow_mut() = Some(config);
                Ok(Recording {
                    ran: &ran,
                    fail: false,
                })
            },
        )
        .expect("bootstrap");

        assert_eq!(debug_seen.get(), Some(false));
        assert_eq!(received.into_inner(), Some(expected));
        assert!(ran.get());
    }

    #[test]
    fn debug_flag_reaches_logging_initializer() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(temp.path(), "run_options:\n  debug_mode: true\n");
        let debug_seen = Cell::new(None);
        let ran = Cell::new(false);

        run_with(
            &path,
            |debug| {
                debug_seen.set(Some(debug));
                Ok(LogHandle::new(debug))
            },
            |_, log| {
                assert!(log.is_debug());
                Ok(Recording {
                    ran: &ran,
                    fail: false,
                })
            },
        )
        .expect("bootstrap");

        assert_eq!(debug_seen.get(), Some(true));
    }

    #[test]
    fn orchestrator_failure_propagates_unmodified() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(temp.path(), "run_options:\n  debug_mode: false\n");
        let ran = Cell::new(false);

        let err = run_with(
            &path,
            |debug| Ok(LogHandle::new(debug)),
            |_, _| {
                Ok(Recording {
                    ran: &ran,
                    fail: true,
                })
            },
        )
        .expect_err("run fails");

        assert!(ran.get());
        assert!(err.downcast_ref::<VocabularyMissing>().is_some());
        assert_eq!(format!("{err:#}"), "vocabulary table missing");
    }

    #[test]
    fn invalid_yaml_fails_before_logging() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(temp.path(), "run_options: {debug_mode: true\n");
        let logging_called = Cell::new(false);

        let err = run_with::<_, _, Recording>(
            &path,
            |debug| {
                logging_called.set(true);
                Ok(LogHandle::new(debug))
            },
            |_, _| unreachable!("orchestrator must not be built"),
        )
        .expect_err("parse fails");

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
        assert!(!logging_called.get());
    }

    #[test]
    fn missing_debug_flag_fails_before_logging() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(temp.path(), "run_options:\n  other: 1\n");
        let logging_called = Cell::new(false);

        let err = run_with::<_, _, Recording>(
            &path,
            |debug| {
                logging_called.set(true);
                Ok(LogHandle::new(debug))
            },
            |_, _| unreachable!("orchestrator must not be built"),
        )
        .expect_err("missing field");

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingField("run_options.debug_mode"))
        ));
        assert!(!logging_called.get());
    }

    #[test]
    fn construction_failure_skips_run_but_keeps_logging() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_config(temp.path(), "run_options:\n  debug_mode: false\n");
        let logging_called = Cell::new(false);

        let err = run_with::<_, _, Recording>(
            &path,
            |debug| {
                logging_called.set(true);
                Ok(LogHandle::new(debug))
            },
            |_, _| Err(anyhow::anyhow!("database section invalid")),
        )
        .expect_err("construction fails");

        assert!(logging_called.get());
        assert_eq!(err.to_string(), "database section invalid");
    }
}
