//! Test-only helpers for configuration files and scripted pipeline steps.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;

use crate::io::config::RunConfiguration;
use crate::wrapper::EtlStep;

/// Write `yaml` to `<dir>/config.yaml` and return the path.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, yaml).expect("write config.yaml");
    path
}

/// Shared record of which steps ran, in order.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: &str) {
        self.0.borrow_mut().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// Error returned by a failing [`ScriptedStep`].
#[derive(Debug, Error)]
#[error("step {step} failed")]
pub struct StepFailure {
    pub step: String,
}

/// Step that records its invocation and returns a predetermined outcome.
pub struct ScriptedStep {
    name: String,
    fail: bool,
    journal: Journal,
}

impl ScriptedStep {
    pub fn ok(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            journal: journal.clone(),
        }
    }

    pub fn failing(name: &str, journal: &Journal) -> Self {
        Self {
            fail: true,
            ..Self::ok(name, journal)
        }
    }
}

impl EtlStep for ScriptedStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, _config: &RunConfiguration) -> Result<()> {
        self.journal.record(&self.name);
        if self.fail {
            return Err(StepFailure {
                step: self.name.clone(),
            }
            .into());
        }
        Ok(())
    }
}
