//! Headless wizard scripts
//!
//! A script is a list of recorded actions replayed against a
//! [`StepWizard`]. Edits that the wizard refuses are reported and the run
//! goes on; a failed `expect-step` stops it.

use crate::error::{Error, Result};
use crate::record::{Field, FieldValue};
use crate::submit::SubmissionSink;
use crate::wizard::{StepWizard, Transition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Action {
    Set { field: Field, value: String },
    Clear { field: Field },
    Next,
    Prev,
    Jump { step: usize },
    ExpectStep { step: usize },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Set { field, value } => write!(f, "set {} = {:?}", field, value),
            Action::Clear { field } => write!(f, "clear {}", field),
            Action::Next => f.write_str("next"),
            Action::Prev => f.write_str("prev"),
            Action::Jump { step } => write!(f, "jump {}", step),
            Action::ExpectStep { step } => write!(f, "expect-step {}", step),
        }
    }
}

/// A replayable list of actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub actions: Vec<Action>,

    /// Directory relative image paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// What a single action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// A navigation request and its outcome
    Navigated(Transition),
    /// An edit merged into the record
    Edited,
    /// An edit the wizard refused
    Rejected(String),
    /// An `expect-step` that held
    Checked,
}

/// Outcome of one action, with a snapshot of the wizard after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: Action,
    pub result: ActionResult,
    pub step_after: usize,
    pub error_count: usize,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub outcomes: Vec<ActionOutcome>,
    pub submitted: bool,
}

impl ScriptReport {
    /// Number of refused edits
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, ActionResult::Rejected(_)))
            .count()
    }
}

impl Script {
    /// Load a script from a TOML or JSON file (by extension, TOML otherwise)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let mut script: Script = if is_json {
            serde_json::from_str(&content).map_err(|e| Error::ScriptParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| Error::ScriptParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        script.base_dir = path.parent().map(|p| p.to_path_buf());
        info!(path = %path.display(), actions = script.actions.len(), "Script loaded");
        Ok(script)
    }

    /// Replay every action against the wizard
    pub fn run<S: SubmissionSink>(&self, wizard: &mut StepWizard<S>) -> Result<ScriptReport> {
        self.run_with(wizard, |_| {})
    }

    /// Replay every action, handing each outcome to `observe` as it happens
    pub fn run_with<S, F>(&self, wizard: &mut StepWizard<S>, mut observe: F) -> Result<ScriptReport>
    where
        S: SubmissionSink,
        F: FnMut(&ActionOutcome),
    {
        let mut report = ScriptReport::default();

        for action in &self.actions {
            debug!(%action, "Running script action");
            let result = self.apply(action, wizard)?;

            let outcome = ActionOutcome {
                action: action.clone(),
                result,
                step_after: wizard.current_step(),
                error_count: wizard.errors().len(),
            };
            observe(&outcome);
            report.outcomes.push(outcome);
        }

        report.submitted = wizard.is_submitted();
        info!(
            actions = report.outcomes.len(),
            rejected = report.rejected(),
            submitted = report.submitted,
            "Script finished"
        );
        Ok(report)
    }

    fn apply<S: SubmissionSink>(
        &self,
        action: &Action,
        wizard: &mut StepWizard<S>,
    ) -> Result<ActionResult> {
        match action {
            Action::Set { field, value } => {
                let raw = self.resolve_value(*field, value);
                let edit = FieldValue::parse(*field, &raw)
                    .and_then(|value| wizard.update_field(*field, value));
                Ok(edit_result(edit))
            }
            Action::Clear { field } => {
                Ok(edit_result(wizard.update_field(*field, FieldValue::Cleared)))
            }
            Action::Next => wizard.go_next().map(ActionResult::Navigated),
            Action::Prev => Ok(ActionResult::Navigated(wizard.go_prev())),
            Action::Jump { step } => wizard.jump_to(*step).map(ActionResult::Navigated),
            Action::ExpectStep { step } => {
                let actual = wizard.current_step();
                if actual != *step {
                    return Err(Error::ExpectationFailed {
                        expected: *step,
                        actual,
                    });
                }
                Ok(ActionResult::Checked)
            }
        }
    }

    fn resolve_value(&self, field: Field, value: &str) -> String {
        if field != Field::File || value.trim().is_empty() {
            return value.to_string();
        }
        match &self.base_dir {
            Some(base) if Path::new(value.trim()).is_relative() => {
                base.join(value.trim()).display().to_string()
            }
            _ => value.to_string(),
        }
    }
}

fn edit_result(edit: Result<()>) -> ActionResult {
    match edit {
        Ok(()) => ActionResult::Edited,
        Err(e) => {
            warn!(error = %e, "Edit rejected");
            ActionResult::Rejected(e.to_string())
        }
    }
}
