//! Run configuration loaded from the YAML file given on the command line.
//!
//! Only `run_options.debug_mode` is interpreted here. Every other section is
//! kept verbatim and handed to the orchestrator, which validates what it uses.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

const RUN_OPTIONS: &str = "run_options";
const DEBUG_MODE: &str = "run_options.debug_mode";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read configuration {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse configuration")]
    Parse(#[from] serde_yaml::Error),

    #[error("configuration root must be a mapping")]
    NotAMapping,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid section `{section}`")]
    Section {
        section: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Options from the `run_options` section that the bootstrap itself reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Emit debug-level log output for the whole run.
    pub debug_mode: bool,
}

/// Parsed configuration document, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    run_options: RunOptions,
    document: Mapping,
}

impl RunConfiguration {
    /// Parse a YAML document and validate the fields required by the bootstrap.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let document = match serde_yaml::from_str::<Value>(contents)? {
            Value::Mapping(mapping) => mapping,
            _ => return Err(ConfigError::NotAMapping),
        };
        let run_options = read_run_options(&document)?;
        Ok(Self {
            run_options,
            document,
        })
    }

    pub fn run_options(&self) -> &RunOptions {
        &self.run_options
    }

    pub fn debug_mode(&self) -> bool {
        self.run_options.debug_mode
    }

    /// The full document, including sections the bootstrap does not interpret.
    pub fn document(&self) -> &Mapping {
        &self.document
    }

    /// Raw value of a top-level section.
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Deserialize a top-level section into a typed struct.
    ///
    /// Returns `Ok(None)` when the section is absent.
    pub fn deserialize_section<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.section(key) else {
            return Ok(None);
        };
        serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|source| ConfigError::Section {
                section: key.to_string(),
                source,
            })
    }

    /// Names of the top-level sections, in document order.
    pub fn section_names(&self) -> Vec<String> {
        self.document
            .keys()
            .map(|key| match key {
                Value::String(name) => name.clone(),
                other => format!("{other:?}"),
            })
            .collect()
    }
}

fn read_run_options(document: &Mapping) -> Result<RunOptions, ConfigError> {
    let section = match document.get(RUN_OPTIONS) {
        None => return Err(ConfigError::MissingField(RUN_OPTIONS)),
        Some(Value::Mapping(section)) => section,
        Some(_) => {
            return Err(ConfigError::InvalidField {
                field: RUN_OPTIONS,
                expected: "mapping",
            });
        }
    };
    let debug_mode = match section.get("debug_mode") {
        None => return Err(ConfigError::MissingField(DEBUG_MODE)),
        Some(Value::Bool(flag)) => Some(*flag),
        Some(Value::String(raw)) => yaml11_bool(raw),
        Some(_) => None,
    }
    .ok_or(ConfigError::InvalidField {
        field: DEBUG_MODE,
        expected: "boolean",
    })?;
    Ok(RunOptions { debug_mode })
}

/// Boolean spellings from YAML 1.1 that a 1.2 parser leaves as plain strings.
fn yaml11_bool(raw: &str) -> Option<bool> {
    match raw {
        "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
            Some(true)
        }
        "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
            Some(false)
        }
        _ => None,
    }
}

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<RunConfiguration, ConfigError> {
    debug!(path = %path.display(), "loading configuration");
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    RunConfiguration::from_yaml_str(&contents)
}
