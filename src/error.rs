//! Error types for the onboarding wizard

use crate::record::Field;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the onboarding wizard
///
/// Field validation failures are not errors: they are reported through
/// [`crate::schema::ErrorMap`]. This type covers edits the wizard refuses
/// and failures of the surrounding machinery.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to parse script {path}: {message}")]
    ScriptParse { path: PathBuf, message: String },

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidValue { field: Field, expected: &'static str },

    #[error("A state can only be selected after a country")]
    StateWithoutCountry,

    #[error("Step {step} does not exist (wizard has {count} steps)")]
    StepOutOfRange { step: usize, count: usize },

    #[error("The onboarding record has already been submitted")]
    AlreadySubmitted,

    #[error("Profile image {path} is unavailable: {message}")]
    ImageUnavailable { path: PathBuf, message: String },

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Expected to be on step {expected}, but wizard is on step {actual}")]
    ExpectationFailed { expected: usize, actual: usize },
}
