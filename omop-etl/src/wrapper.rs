//! ETL orchestration seam.
//!
//! The bootstrap only knows the [`Orchestrator`] trait. [`Wrapper`] is the
//! default implementation: it owns the run configuration and executes the
//! registered [`EtlStep`]s in order, stopping at the first failure.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::io::config::RunConfiguration;
use crate::logging::LogHandle;

/// Something that executes a complete ETL run.
pub trait Orchestrator {
    /// Run the pipeline to completion. Errors are returned as-is to the caller.
    fn run(&mut self) -> Result<()>;
}

/// One unit of pipeline work (extraction, a table transformation, a load).
pub trait EtlStep {
    fn name(&self) -> &str;

    fn execute(&mut self, config: &RunConfiguration) -> Result<()>;
}

/// Default orchestrator: runs steps sequentially against one configuration.
pub struct Wrapper {
    config: RunConfiguration,
    log: LogHandle,
    steps: Vec<Box<dyn EtlStep>>,
}

impl Wrapper {
    pub fn new(config: RunConfiguration, log: &LogHandle) -> Self {
        Self {
            config,
            log: *log,
            steps: Vec::new(),
        }
    }

    /// Append a step; steps run in registration order.
    pub fn with_step(mut self, step: impl EtlStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }
}

impl Orchestrator for Wrapper {
    #[instrument(skip_all, fields(steps = self.steps.len(), debug = self.log.is_debug()))]
    fn run(&mut self) -> Result<()> {
        debug!(sections = ?self.config.section_names(), "configuration sections");
        if self.steps.is_empty() {
            warn!("no ETL steps registered, nothing to do");
            return Ok(());
        }

        let run_started = Instant::now();
        for step in &mut self.steps {
            let name = step.name().to_string();
            info!(step = %name, "starting step");
            let started = Instant::now();
            step.execute(&self.config)?;
            info!(
                step = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "step finished"
            );
        }
        info!(
            elapsed_ms = run_started.elapsed().as_millis() as u64,
            "ETL run finished"
        );
        Ok(())
    }
}
