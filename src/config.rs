//! Configuration types for the onboarding wizard

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What is validated before the record is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitPolicy {
    /// Only the last step's fields, each earlier step having been checked
    /// when it was left
    #[default]
    LastStep,
    /// Every field of the record; on failure the wizard moves back to the
    /// first step owning an invalid field
    FullRecord,
}

/// Configuration for the onboarding wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Submit-time validation policy
    pub submit_policy: SubmitPolicy,

    /// Clear a step's field errors when navigating back from it
    pub clear_errors_on_back: bool,

    /// Write the submitted record to this JSON file (logged otherwise)
    pub submission_file: Option<PathBuf>,

    /// Log directory, relative to the executable directory unless absolute
    pub log_dir: PathBuf,

    /// UI locale (e.g. "en", "zh-CN"); system locale when unset
    pub locale: Option<String>,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submit_policy: SubmitPolicy::default(),
            clear_errors_on_back: false,
            submission_file: None,
            log_dir: PathBuf::from("Log"),
            locale: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Resolve the log directory against a base directory
    pub fn resolve_log_dir(&self, base: &Path) -> PathBuf {
        if self.log_dir.is_absolute() {
            self.log_dir.clone()
        } else {
            base.join(&self.log_dir)
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Driver Onboarding Configuration File
# This file uses TOML format (https://toml.io)

# Submit-time validation: "last-step" or "full-record"
# - last-step: only the final step is checked before submitting (default)
# - full-record: every field is re-checked; on failure the wizard returns
#   to the first step with an invalid field
submit_policy = "last-step"

# Clear a step's error messages when navigating back from it
clear_errors_on_back = false

# Write the submitted record as JSON to this file.
# When omitted the record is written to the log.
# submission_file = "Submissions/driver.json"

# Log directory (relative to the executable unless absolute)
log_dir = "Log"

# UI language: "en" or "zh-CN". Defaults to the system locale.
# locale = "en"

# Verbose output
verbose = false
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError {
        source: toml::ser::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}
