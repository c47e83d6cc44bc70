//! Step wizard controller
//!
//! Owns the current step, the record being built and the field errors.
//! Forward moves are gated on the fields of the step being left; backward
//! moves never validate. Passing the last step hands the record to the
//! submission sink.

use crate::config::{Config, SubmitPolicy};
use crate::error::{Error, Result};
use crate::record::{Field, FieldValue, OnboardingRecord};
use crate::schema::{ErrorMap, Schema};
use crate::steps::{ONBOARDING_STEPS, StepDefinition, owner_of};
use crate::submit::SubmissionSink;
use tracing::{debug, info, warn};

/// Behaviour switches of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardOptions {
    /// What is validated before the record is submitted
    pub submit_policy: SubmitPolicy,
    /// Drop the errors of a step when navigating back from it
    pub clear_errors_on_back: bool,
}

impl From<&Config> for WizardOptions {
    fn from(config: &Config) -> Self {
        Self {
            submit_policy: config.submit_policy,
            clear_errors_on_back: config.clear_errors_on_back,
        }
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The current step changed
    Moved { from: usize, to: usize },
    /// Validation failed at `step`, which is now the current step
    Blocked { step: usize, failed: Vec<Field> },
    /// Full-record validation failed at submit time; moved to the first
    /// step owning an invalid field
    Rewound { to: usize, failed: Vec<Field> },
    /// The record was handed to the sink
    Submitted,
    /// Nothing to do (already at the boundary or target)
    Stayed,
}

impl Transition {
    /// Whether the request was refused by validation
    pub fn is_blocked(&self) -> bool {
        matches!(self, Transition::Blocked { .. } | Transition::Rewound { .. })
    }
}

/// The step wizard controller
#[derive(Debug)]
pub struct StepWizard<S: SubmissionSink> {
    steps: &'static [StepDefinition],
    current_step: usize,
    record: OnboardingRecord,
    errors: ErrorMap,
    schema: Schema,
    options: WizardOptions,
    sink: S,
    submitted: bool,
}

impl<S: SubmissionSink> StepWizard<S> {
    /// Create a wizard over the onboarding steps with default options
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, WizardOptions::default())
    }

    /// Create a wizard with explicit options
    pub fn with_options(sink: S, options: WizardOptions) -> Self {
        Self {
            steps: &ONBOARDING_STEPS,
            current_step: 1,
            record: OnboardingRecord::new(),
            errors: ErrorMap::new(),
            schema: Schema::onboarding(),
            options,
            sink,
            submitted: false,
        }
    }

    /// Replace the validation schema
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// 1-based index of the active step
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// All step definitions
    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    /// Definition of the active step
    pub fn step(&self) -> &'static StepDefinition {
        let steps = self.steps;
        &steps[self.current_step - 1]
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.steps.len()
    }

    /// Read-only view of the record
    pub fn record(&self) -> &OnboardingRecord {
        &self.record
    }

    /// Current field errors
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn options(&self) -> WizardOptions {
        self.options
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Advance one step, or submit from the last step
    pub fn go_next(&mut self) -> Result<Transition> {
        if self.submitted {
            return Err(Error::AlreadySubmitted);
        }

        let from = self.current_step;
        let failed = self.validate_current_step();
        if !failed.is_empty() {
            info!(step = from, ?failed, "Step validation failed");
            return Ok(Transition::Blocked { step: from, failed });
        }

        if from < self.step_count() {
            self.current_step += 1;
            info!(from, to = self.current_step, "Advanced to next step");
            return Ok(Transition::Moved {
                from,
                to: self.current_step,
            });
        }

        self.submit()
    }

    /// Go back one step without validating
    pub fn go_prev(&mut self) -> Transition {
        if self.current_step <= 1 {
            return Transition::Stayed;
        }

        let from = self.current_step;
        self.move_back(from - 1);
        Transition::Moved { from, to: from - 1 }
    }

    /// Jump to a step
    ///
    /// Backward jumps are unconditional. Forward jumps validate every step
    /// from the current one up to the target, as repeated `go_next` would,
    /// and stop on the first step that fails.
    pub fn jump_to(&mut self, target: usize) -> Result<Transition> {
        let count = self.step_count();
        if target == 0 || target > count {
            return Err(Error::StepOutOfRange {
                step: target,
                count,
            });
        }

        let from = self.current_step;
        if target == from {
            return Ok(Transition::Stayed);
        }

        if target < from {
            self.move_back(target);
            return Ok(Transition::Moved { from, to: target });
        }

        while self.current_step < target {
            let failed = self.validate_current_step();
            if !failed.is_empty() {
                let step = self.current_step;
                info!(from, step, target, ?failed, "Jump stopped by validation");
                return Ok(Transition::Blocked { step, failed });
            }
            self.current_step += 1;
        }

        info!(from, to = target, "Jumped forward");
        Ok(Transition::Moved { from, to: target })
    }

    /// Merge one field edit into the record
    ///
    /// Any field may be edited regardless of the active step. The edited
    /// field is re-validated for display; nothing is gated on the result.
    pub fn update_field(&mut self, field: Field, value: FieldValue) -> Result<()> {
        let clears = match &value {
            FieldValue::Cleared => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        };
        if field == Field::State && !self.record.is_set(Field::Country) && !clears {
            warn!("State edit ignored: no country selected");
            return Err(Error::StateWithoutCountry);
        }

        let country_changed = field == Field::Country
            && match &value {
                FieldValue::Text(country) => *country != self.record.country,
                FieldValue::Cleared => !self.record.country.is_empty(),
                _ => false,
            };

        self.record.set(field, value)?;
        self.revalidate(field);

        if country_changed {
            self.record.state.clear();
            self.revalidate(Field::State);
            debug!(country = %self.record.country, "State reset after country change");
        }

        Ok(())
    }

    fn revalidate(&mut self, field: Field) {
        match self.schema.validate_field(field, &self.record) {
            Some(error) => self.errors.insert(field, error),
            None => {
                self.errors.remove(field);
            }
        }
    }

    /// Validate the active step's fields, refresh their error entries and
    /// return the failing ones in rendering order
    fn validate_current_step(&mut self) -> Vec<Field> {
        let fields = self.step().fields;
        let fresh = self.schema.validate(fields, &self.record);
        let failed = fields
            .iter()
            .copied()
            .filter(|field| fresh.contains(*field))
            .collect();
        self.errors.merge_scoped(fields, fresh);
        failed
    }

    fn move_back(&mut self, to: usize) {
        if self.options.clear_errors_on_back {
            let fields = self.step().fields;
            self.errors.clear_fields(fields);
        }
        info!(from = self.current_step, to, "Moved back");
        self.current_step = to;
    }

    fn submit(&mut self) -> Result<Transition> {
        if self.options.submit_policy == SubmitPolicy::FullRecord {
            let all = self.schema.validate_all(&self.record);
            if !all.is_empty() {
                let failed = all.fields();
                let to = failed
                    .iter()
                    .filter_map(|field| owner_of(self.steps, *field))
                    .map(|step| step.id)
                    .min()
                    .unwrap_or(self.current_step);
                warn!(?failed, to, "Full record validation failed at submit");
                self.errors = all;
                self.current_step = to;
                return Ok(Transition::Rewound { to, failed });
            }
        }

        self.sink.submit(&self.record)?;
        self.submitted = true;
        info!("Onboarding record handed to submission sink");
        Ok(Transition::Submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ProfileImage;
    use crate::record::Gender;
    use crate::submit::MemorySink;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn image() -> FieldValue {
        FieldValue::Image(ProfileImage {
            file_name: "avatar.png".to_string(),
            size: 2048,
            digest: "0123456789abcdef".to_string(),
        })
    }

    fn fill_basic<S: SubmissionSink>(wizard: &mut StepWizard<S>) {
        wizard.update_field(Field::File, image()).unwrap();
        wizard.update_field(Field::FirstName, text("Chidi")).unwrap();
        wizard.update_field(Field::LastName, text("Okafor")).unwrap();
        wizard
            .update_field(Field::Email, text("chidi@example.com"))
            .unwrap();
        wizard
            .update_field(Field::Gender, FieldValue::Gender(Gender::Male))
            .unwrap();
    }

    fn fill_address<S: SubmissionSink>(wizard: &mut StepWizard<S>) {
        wizard.update_field(Field::Country, text("Nigeria")).unwrap();
        wizard.update_field(Field::State, text("Lagos")).unwrap();
        wizard.update_field(Field::City, text("Ikeja")).unwrap();
        wizard
            .update_field(Field::Address, text("12 Allen Avenue"))
            .unwrap();
        wizard
            .update_field(Field::PhoneNumber, text("+2348012345678"))
            .unwrap();
    }

    fn fill_payment<S: SubmissionSink>(wizard: &mut StepWizard<S>) {
        wizard
            .update_field(Field::AccountName, text("Chidi Okafor"))
            .unwrap();
        wizard
            .update_field(Field::AccountNumber, text("0123456789"))
            .unwrap();
        wizard.update_field(Field::BankName, text("GTBank")).unwrap();
    }

    #[test]
    fn test_starts_on_first_step_with_empty_record() {
        let wizard = StepWizard::new(MemorySink::new());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.step_count(), 3);
        assert_eq!(wizard.record(), &OnboardingRecord::new());
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_empty_basic_info_blocks_next() {
        let mut wizard = StepWizard::new(MemorySink::new());

        let transition = wizard.go_next().unwrap();

        assert!(transition.is_blocked());
        assert_eq!(wizard.current_step(), 1);
        for field in [
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::Gender,
            Field::File,
        ] {
            assert!(wizard.errors().contains(field), "missing error for {}", field);
        }
        // only the active step is validated
        assert!(!wizard.errors().contains(Field::City));
    }

    #[test]
    fn test_valid_basic_info_advances() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);

        let transition = wizard.go_next().unwrap();

        assert_eq!(transition, Transition::Moved { from: 1, to: 2 });
        assert_eq!(wizard.current_step(), 2);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_single_invalid_field_blocks() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.update_field(Field::Email, text("not-an-email")).unwrap();

        let transition = wizard.go_next().unwrap();

        assert_eq!(
            transition,
            Transition::Blocked {
                step: 1,
                failed: vec![Field::Email]
            }
        );
        assert_eq!(wizard.errors().len(), 1);
    }

    #[test]
    fn test_prev_is_unconditional_and_keeps_record() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        let before = wizard.record().clone();

        assert_eq!(wizard.go_prev(), Transition::Moved { from: 2, to: 1 });
        assert_eq!(wizard.record(), &before);
        assert_eq!(wizard.go_prev(), Transition::Stayed);
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_prev_ignores_invalid_current_step() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        assert!(wizard.go_next().unwrap().is_blocked());

        assert_eq!(wizard.go_prev(), Transition::Moved { from: 2, to: 1 });
    }

    #[test]
    fn test_errors_kept_on_back_by_default() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        wizard.go_next().unwrap();
        assert!(wizard.errors().contains(Field::City));

        wizard.go_prev();
        assert!(wizard.errors().contains(Field::City));
    }

    #[test]
    fn test_errors_cleared_on_back_when_enabled() {
        let options = WizardOptions {
            clear_errors_on_back: true,
            ..Default::default()
        };
        let mut wizard = StepWizard::with_options(MemorySink::new(), options);
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        wizard.go_next().unwrap();
        assert!(wizard.errors().contains(Field::City));

        wizard.go_prev();
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_country_change_resets_state() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();

        wizard.update_field(Field::Country, text("Nigeria")).unwrap();
        wizard.update_field(Field::State, text("Lagos")).unwrap();
        assert_eq!(wizard.record().state, "Lagos");

        wizard.update_field(Field::Country, text("Ghana")).unwrap();
        assert_eq!(wizard.record().country, "Ghana");
        assert_eq!(wizard.record().state, "");
        assert!(wizard.errors().contains(Field::State));
    }

    #[test]
    fn test_same_country_keeps_state() {
        let mut wizard = StepWizard::new(MemorySink::new());
        wizard.update_field(Field::Country, text("Nigeria")).unwrap();
        wizard.update_field(Field::State, text("Oyo")).unwrap();

        wizard.update_field(Field::Country, text("Nigeria")).unwrap();
        assert_eq!(wizard.record().state, "Oyo");
    }

    #[test]
    fn test_state_requires_country() {
        let mut wizard = StepWizard::new(MemorySink::new());
        let err = wizard.update_field(Field::State, text("Lagos")).unwrap_err();
        assert!(matches!(err, Error::StateWithoutCountry));
        assert!(wizard.record().state.is_empty());

        wizard.update_field(Field::State, FieldValue::Cleared).unwrap();
    }

    #[test]
    fn test_empty_state_without_country_is_a_clear() {
        let mut wizard = StepWizard::new(MemorySink::new());
        assert!(wizard.update_field(Field::State, text("")).is_ok());
        assert!(wizard.update_field(Field::State, FieldValue::Cleared).is_ok());
        assert_eq!(wizard.record().state, "");
    }

    #[test]
    fn test_update_revalidates_edited_field_only() {
        let mut wizard = StepWizard::new(MemorySink::new());
        wizard.go_next().unwrap();
        assert!(wizard.errors().contains(Field::FirstName));

        wizard.update_field(Field::FirstName, text("Ngozi")).unwrap();
        assert!(!wizard.errors().contains(Field::FirstName));
        assert!(wizard.errors().contains(Field::LastName));

        wizard.update_field(Field::FirstName, text("Ng")).unwrap();
        assert!(wizard.errors().contains(Field::FirstName));
    }

    #[test]
    fn test_edits_outside_active_step_are_merged() {
        let mut wizard = StepWizard::new(MemorySink::new());
        wizard.update_field(Field::BankName, text("UBA")).unwrap();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.record().bank_name, "UBA");
    }

    #[test]
    fn test_update_rejects_wrong_value_kind() {
        let mut wizard = StepWizard::new(MemorySink::new());
        let err = wizard.update_field(Field::File, text("avatar.png")).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field: Field::File, .. }));
    }

    #[test]
    fn test_jump_backward_never_validates() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        wizard.update_field(Field::FirstName, FieldValue::Cleared).unwrap();
        let errors_before = wizard.errors().clone();

        assert_eq!(wizard.jump_to(1).unwrap(), Transition::Moved { from: 2, to: 1 });
        assert_eq!(wizard.errors(), &errors_before);
        assert_eq!(wizard.jump_to(1).unwrap(), Transition::Stayed);
    }

    #[test]
    fn test_jump_forward_blocked_by_current_step() {
        let mut wizard = StepWizard::new(MemorySink::new());

        let transition = wizard.jump_to(3).unwrap();
        assert_eq!(
            transition,
            Transition::Blocked {
                step: 1,
                failed: vec![
                    Field::File,
                    Field::FirstName,
                    Field::LastName,
                    Field::Email,
                    Field::Gender
                ]
            }
        );
        assert_eq!(wizard.current_step(), 1);
        assert!(!wizard.errors().contains(Field::City));
    }

    #[test]
    fn test_jump_forward_stops_at_unfilled_intermediate_step() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);

        let transition = wizard.jump_to(3).unwrap();

        assert_eq!(
            transition,
            Transition::Blocked {
                step: 2,
                failed: vec![
                    Field::Country,
                    Field::State,
                    Field::City,
                    Field::Address,
                    Field::PhoneNumber
                ]
            }
        );
        assert_eq!(wizard.current_step(), 2);
        assert!(wizard.errors().contains(Field::City));

        // the last step can't be reached, so nothing is submitted
        fill_payment(&mut wizard);
        assert!(wizard.go_next().unwrap().is_blocked());
        assert!(wizard.sink().submissions().is_empty());
    }

    #[test]
    fn test_jump_forward_over_valid_steps() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        fill_address(&mut wizard);

        assert_eq!(wizard.jump_to(3).unwrap(), Transition::Moved { from: 1, to: 3 });
        assert!(wizard.errors().is_empty());

        fill_payment(&mut wizard);
        assert_eq!(wizard.go_next().unwrap(), Transition::Submitted);
        let record = &wizard.sink().submissions()[0];
        assert!(Schema::onboarding().validate_all(record).is_empty());
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut wizard = StepWizard::new(MemorySink::new());
        assert!(matches!(
            wizard.jump_to(0),
            Err(Error::StepOutOfRange { step: 0, count: 3 })
        ));
        assert!(matches!(
            wizard.jump_to(4),
            Err(Error::StepOutOfRange { step: 4, count: 3 })
        ));
    }

    #[test]
    fn test_full_flow_submits_exactly_once() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        assert_eq!(wizard.go_next().unwrap(), Transition::Moved { from: 1, to: 2 });
        fill_address(&mut wizard);
        assert_eq!(wizard.go_next().unwrap(), Transition::Moved { from: 2, to: 3 });
        fill_payment(&mut wizard);

        assert_eq!(wizard.go_next().unwrap(), Transition::Submitted);
        assert_eq!(wizard.current_step(), 3);
        assert!(wizard.is_submitted());

        let submissions = wizard.sink().submissions();
        assert_eq!(submissions.len(), 1);
        let record = &submissions[0];
        assert_eq!(record.first_name, "Chidi");
        assert_eq!(record.state, "Lagos");
        assert_eq!(record.account_number, "0123456789");
        assert!(Schema::onboarding().validate_all(record).is_empty());

        assert!(matches!(wizard.go_next(), Err(Error::AlreadySubmitted)));
        assert_eq!(wizard.sink().submissions().len(), 1);
    }

    #[test]
    fn test_invalid_last_step_does_not_submit() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        fill_address(&mut wizard);
        wizard.go_next().unwrap();

        assert!(wizard.go_next().unwrap().is_blocked());
        assert!(wizard.sink().submissions().is_empty());
        assert!(!wizard.is_submitted());
    }

    #[test]
    fn test_last_step_policy_submits_stale_earlier_steps() {
        let mut wizard = StepWizard::new(MemorySink::new());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        fill_address(&mut wizard);
        wizard.go_next().unwrap();
        fill_payment(&mut wizard);
        wizard.update_field(Field::Email, text("broken")).unwrap();

        assert_eq!(wizard.go_next().unwrap(), Transition::Submitted);
        assert_eq!(wizard.sink().submissions()[0].email, "broken");
    }

    #[test]
    fn test_full_record_policy_rewinds_to_first_invalid_step() {
        let options = WizardOptions {
            submit_policy: SubmitPolicy::FullRecord,
            ..Default::default()
        };
        let mut wizard = StepWizard::with_options(MemorySink::new(), options);
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        fill_address(&mut wizard);
        wizard.go_next().unwrap();
        fill_payment(&mut wizard);
        wizard.update_field(Field::Email, text("broken")).unwrap();

        let transition = wizard.go_next().unwrap();

        assert_eq!(
            transition,
            Transition::Rewound {
                to: 1,
                failed: vec![Field::Email]
            }
        );
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.sink().submissions().is_empty());

        wizard
            .update_field(Field::Email, text("chidi@example.com"))
            .unwrap();
        wizard.jump_to(3).unwrap();
        assert_eq!(wizard.go_next().unwrap(), Transition::Submitted);
    }

    #[derive(Debug, Default)]
    struct FailingSink {
        attempts: usize,
    }

    impl SubmissionSink for FailingSink {
        fn submit(&mut self, _record: &OnboardingRecord) -> Result<()> {
            self.attempts += 1;
            Err(Error::Submission("offline".to_string()))
        }
    }

    #[test]
    fn test_sink_failure_leaves_wizard_retryable() {
        let mut wizard = StepWizard::new(FailingSink::default());
        fill_basic(&mut wizard);
        wizard.go_next().unwrap();
        fill_address(&mut wizard);
        wizard.go_next().unwrap();
        fill_payment(&mut wizard);

        assert!(matches!(wizard.go_next(), Err(Error::Submission(_))));
        assert!(!wizard.is_submitted());
        assert!(matches!(wizard.go_next(), Err(Error::Submission(_))));
        assert_eq!(wizard.sink().attempts, 2);
    }
}
