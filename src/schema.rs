//! Onboarding schema and validator
//!
//! The schema is an explicit list of rules, one per record field. The
//! validator is a pure function over a field subset and a record, so the
//! wizard can check exactly the fields owned by the step being left.

use crate::record::{Field, OnboardingRecord};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// A single check applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The field must hold a value (image picked, gender chosen)
    Present,
    /// At least this many characters
    MinChars(usize),
    /// At most this many characters
    MaxChars(usize),
    /// Syntactically valid email address
    Email,
}

impl Constraint {
    /// Whether the field value satisfies this constraint
    pub fn check(&self, field: Field, record: &OnboardingRecord) -> bool {
        match self {
            Constraint::Present => record.is_set(field),
            Constraint::MinChars(min) => char_count(field, record) >= *min,
            Constraint::MaxChars(max) => char_count(field, record) <= *max,
            Constraint::Email => record.text(field).is_some_and(is_valid_email),
        }
    }
}

fn char_count(field: Field, record: &OnboardingRecord) -> usize {
    record.text(field).map(|s| s.chars().count()).unwrap_or(0)
}

/// Email syntax check
///
/// The local part may not start with a dot or contain consecutive dots.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

/// A constraint together with the message shown when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub constraint: Constraint,
    /// Translation key of the error message
    pub message_key: &'static str,
}

impl Rule {
    const fn new(constraint: Constraint, message_key: &'static str) -> Self {
        Self {
            constraint,
            message_key,
        }
    }
}

/// All rules for one field, checked in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub rules: Vec<Rule>,
}

/// Validation failure of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub constraint: Constraint,
    pub message_key: &'static str,
}

impl FieldError {
    /// Localized message
    pub fn message(&self) -> String {
        rust_i18n::t!(self.message_key).to_string()
    }
}

/// Field name to error, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<Field, FieldError>,
}

impl ErrorMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Localized message for a field, if it failed
    pub fn message(&self, field: Field) -> Option<String> {
        self.errors.get(&field).map(FieldError::message)
    }

    /// Failing fields in field order
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    /// Replace the entries of `fields` with the entries found in `fresh`
    ///
    /// Entries for fields outside `fields` are left untouched.
    pub fn merge_scoped(&mut self, fields: &[Field], fresh: ErrorMap) {
        for field in fields {
            self.errors.remove(field);
        }
        self.errors.extend(fresh.errors);
    }

    /// Drop the entries of the given fields
    pub fn clear_fields(&mut self, fields: &[Field]) {
        for field in fields {
            self.errors.remove(field);
        }
    }
}

/// The onboarding schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::onboarding()
    }
}

impl Schema {
    /// Build a schema from explicit field rules
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// The driver onboarding rules
    pub fn onboarding() -> Self {
        use Constraint::*;

        let rule = |field: Field, rules: &[Rule]| FieldRule {
            field,
            rules: rules.to_vec(),
        };

        Self::new(vec![
            rule(
                Field::FirstName,
                &[
                    Rule::new(MinChars(3), "err_first_name_required"),
                    Rule::new(MaxChars(256), "err_first_name_too_long"),
                ],
            ),
            rule(
                Field::LastName,
                &[
                    Rule::new(MinChars(3), "err_last_name_required"),
                    Rule::new(MaxChars(256), "err_last_name_too_long"),
                ],
            ),
            rule(Field::File, &[Rule::new(Present, "err_image_required")]),
            rule(Field::Email, &[Rule::new(Email, "err_email_invalid")]),
            rule(Field::Gender, &[Rule::new(Present, "err_gender_required")]),
            rule(Field::Country, &[Rule::new(MinChars(1), "err_country_required")]),
            rule(Field::Address, &[Rule::new(MinChars(1), "err_address_required")]),
            rule(
                Field::City,
                &[
                    Rule::new(MinChars(1), "err_city_required"),
                    Rule::new(MaxChars(256), "err_city_too_long"),
                ],
            ),
            rule(Field::State, &[Rule::new(MinChars(1), "err_state_required")]),
            rule(
                Field::PhoneNumber,
                &[
                    Rule::new(MinChars(11), "err_phone_required"),
                    Rule::new(MaxChars(20), "err_phone_too_long"),
                ],
            ),
            rule(Field::BankName, &[Rule::new(MinChars(1), "err_bank_name_required")]),
            rule(
                Field::AccountNumber,
                &[
                    Rule::new(MinChars(1), "err_account_number_required"),
                    Rule::new(MaxChars(10), "err_account_number_too_long"),
                ],
            ),
            rule(
                Field::AccountName,
                &[Rule::new(MinChars(1), "err_account_name_required")],
            ),
        ])
    }

    /// Rules declared for a field
    pub fn rules_for(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Validate one field, reporting its first failing rule
    pub fn validate_field(&self, field: Field, record: &OnboardingRecord) -> Option<FieldError> {
        let field_rule = self.rules_for(field)?;
        field_rule
            .rules
            .iter()
            .find(|rule| !rule.constraint.check(field, record))
            .map(|rule| FieldError {
                constraint: rule.constraint,
                message_key: rule.message_key,
            })
    }

    /// Validate a subset of fields
    ///
    /// Returns an empty map when every field in the subset is valid.
    /// Fields outside the subset are never looked at.
    pub fn validate(&self, subset: &[Field], record: &OnboardingRecord) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for &field in subset {
            if let Some(error) = self.validate_field(field, record) {
                errors.insert(field, error);
            }
        }
        debug!(
            checked = subset.len(),
            failed = errors.len(),
            "Validated field subset"
        );
        errors
    }

    /// Validate every field the schema knows
    pub fn validate_all(&self, record: &OnboardingRecord) -> ErrorMap {
        let fields: Vec<Field> = self.rules.iter().map(|rule| rule.field).collect();
        self.validate(&fields, record)
    }
}
