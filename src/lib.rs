//! Driver Onboarding - A multi-step driver registration wizard
//!
//! This library collects a driver's registration record across three
//! steps with support for:
//! - Step-scoped validation gating forward navigation
//! - Unconditional backward navigation and step jumping
//! - Live per-field validation with localized messages
//! - Pluggable submission sinks (log, JSON file, memory)
//! - Headless scripted runs and an interactive terminal wizard

// Initialize i18n with locale files
rust_i18n::i18n!("locales", fallback = "en");

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod image;
pub mod record;
pub mod schema;
pub mod script;
pub mod steps;
pub mod submit;
pub mod tui;
pub mod wizard;

pub use cli::Cli;
pub use config::{Config, ConfigError, SubmitPolicy};
pub use error::{Error, Result};
pub use i18n::init_locale;
pub use image::ProfileImage;
pub use record::{Field, FieldValue, Gender, OnboardingRecord};
pub use schema::{ErrorMap, FieldError, Schema};
pub use script::{ActionOutcome, ActionResult, Script, ScriptReport};
pub use steps::{ONBOARDING_STEPS, StepDefinition};
pub use submit::{JsonFileSink, LogSink, MemorySink, SubmissionSink};
pub use tui::{TuiApp, TuiResult, display_snapshot, should_run_interactive};
pub use wizard::{StepWizard, Transition, WizardOptions};
