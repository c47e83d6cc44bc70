//! Wizard step definitions

use crate::record::Field;

/// One screen of the wizard and the fields it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-based position
    pub id: usize,
    /// Translation key of the title
    pub title_key: &'static str,
    /// Translation key of the description
    pub description_key: &'static str,
    /// Owned fields, in rendering order
    pub fields: &'static [Field],
}

impl StepDefinition {
    /// Localized title
    pub fn title(&self) -> String {
        rust_i18n::t!(self.title_key).to_string()
    }

    /// Localized description
    pub fn description(&self) -> String {
        rust_i18n::t!(self.description_key).to_string()
    }

    /// Whether this step owns the field
    pub fn owns(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

/// The onboarding steps
pub const ONBOARDING_STEPS: [StepDefinition; 3] = [
    StepDefinition {
        id: 1,
        title_key: "step_basic_title",
        description_key: "step_basic_description",
        fields: &[
            Field::File,
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::Gender,
        ],
    },
    StepDefinition {
        id: 2,
        title_key: "step_address_title",
        description_key: "step_address_description",
        fields: &[
            Field::Country,
            Field::State,
            Field::City,
            Field::Address,
            Field::PhoneNumber,
        ],
    },
    StepDefinition {
        id: 3,
        title_key: "step_payment_title",
        description_key: "step_payment_description",
        fields: &[Field::AccountName, Field::AccountNumber, Field::BankName],
    },
];

/// Step that owns a field
pub fn owner_of(steps: &[StepDefinition], field: Field) -> Option<&StepDefinition> {
    steps.iter().find(|step| step.owns(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        for (index, step) in ONBOARDING_STEPS.iter().enumerate() {
            assert_eq!(step.id, index + 1);
        }
    }

    #[test]
    fn test_steps_partition_the_record() {
        for field in Field::all() {
            let owners = ONBOARDING_STEPS
                .iter()
                .filter(|step| step.owns(*field))
                .count();
            assert_eq!(owners, 1, "{} must belong to exactly one step", field);
        }
        let total: usize = ONBOARDING_STEPS.iter().map(|s| s.fields.len()).sum();
        assert_eq!(total, Field::all().len());
    }

    #[test]
    fn test_owner_of() {
        assert_eq!(owner_of(&ONBOARDING_STEPS, Field::State).map(|s| s.id), Some(2));
        assert_eq!(owner_of(&ONBOARDING_STEPS, Field::BankName).map(|s| s.id), Some(3));
    }
}
