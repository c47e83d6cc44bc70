//! The onboarding record and its field vocabulary

use crate::error::{Error, Result};
use crate::image::ProfileImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Driver gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All options, in display order
    pub fn variants() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Next option, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    /// Previous option, wrapping around
    pub fn prev(&self) -> Self {
        // only two options
        self.next()
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(()),
        }
    }
}

/// Field names of the onboarding record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    File,
    Email,
    Gender,
    Country,
    Address,
    City,
    State,
    PhoneNumber,
    BankName,
    AccountNumber,
    AccountName,
}

impl Field {
    /// All fields, in record order
    pub fn all() -> &'static [Field] {
        &[
            Field::FirstName,
            Field::LastName,
            Field::File,
            Field::Email,
            Field::Gender,
            Field::Country,
            Field::Address,
            Field::City,
            Field::State,
            Field::PhoneNumber,
            Field::BankName,
            Field::AccountNumber,
            Field::AccountName,
        ]
    }

    /// camelCase key used in scripts and the submission payload
    pub fn key(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::File => "file",
            Field::Email => "email",
            Field::Gender => "gender",
            Field::Country => "country",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::PhoneNumber => "phoneNumber",
            Field::BankName => "bankName",
            Field::AccountNumber => "accountNumber",
            Field::AccountName => "accountName",
        }
    }

    /// Whether the field is edited as free text
    pub fn is_text_field(&self) -> bool {
        !matches!(self, Field::File | Field::Gender)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Field::all()
            .iter()
            .find(|field| field.key() == s)
            .copied()
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// A single edit to the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text for a free-text field
    Text(String),
    /// Gender selection
    Gender(Gender),
    /// Picked profile image
    Image(ProfileImage),
    /// Reset the field to empty
    Cleared,
}

impl FieldValue {
    /// Convert raw user input for a field into a value
    ///
    /// `file` input is a path that is opened immediately; empty input
    /// clears the image.
    pub fn parse(field: Field, raw: &str) -> Result<Self> {
        match field {
            Field::File => {
                if raw.trim().is_empty() {
                    Ok(FieldValue::Cleared)
                } else {
                    ProfileImage::open(Path::new(raw.trim())).map(FieldValue::Image)
                }
            }
            Field::Gender => {
                if raw.trim().is_empty() {
                    return Ok(FieldValue::Cleared);
                }
                raw.parse::<Gender>()
                    .map(FieldValue::Gender)
                    .map_err(|_| Error::InvalidValue {
                        field,
                        expected: "male or female",
                    })
            }
            _ => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

/// The aggregate built across all wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub first_name: String,
    pub last_name: String,
    pub file: Option<ProfileImage>,
    pub email: String,
    pub gender: Option<Gender>,
    pub country: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone_number: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

impl OnboardingRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a free-text field, `None` for `file` and `gender`
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Country => &self.country,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::PhoneNumber => &self.phone_number,
            Field::BankName => &self.bank_name,
            Field::AccountNumber => &self.account_number,
            Field::AccountName => &self.account_name,
            Field::File | Field::Gender => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Country => &mut self.country,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::PhoneNumber => &mut self.phone_number,
            Field::BankName => &mut self.bank_name,
            Field::AccountNumber => &mut self.account_number,
            Field::AccountName => &mut self.account_name,
            Field::File | Field::Gender => return None,
        };
        Some(value)
    }

    /// Whether the field holds anything at all
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::File => self.file.is_some(),
            Field::Gender => self.gender.is_some(),
            _ => self.text(field).is_some_and(|s| !s.is_empty()),
        }
    }

    /// Display string for a field value
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::File => self
                .file
                .as_ref()
                .map(|image| image.file_name.clone())
                .unwrap_or_default(),
            Field::Gender => self
                .gender
                .map(|g| g.as_str().to_string())
                .unwrap_or_default(),
            _ => self.text(field).unwrap_or_default().to_string(),
        }
    }

    /// Store a value in a field
    ///
    /// Only checks that the value kind fits the field. Cross-field rules
    /// live in the wizard.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<()> {
        match (field, value) {
            (Field::File, FieldValue::Image(image)) => self.file = Some(image),
            (Field::File, FieldValue::Cleared) => self.file = None,
            (Field::File, _) => {
                return Err(Error::InvalidValue {
                    field,
                    expected: "an image file",
                });
            }
            (Field::Gender, FieldValue::Gender(gender)) => self.gender = Some(gender),
            (Field::Gender, FieldValue::Cleared) => self.gender = None,
            (Field::Gender, FieldValue::Text(text)) => {
                let gender = text.parse::<Gender>().map_err(|_| Error::InvalidValue {
                    field,
                    expected: "male or female",
                })?;
                self.gender = Some(gender);
            }
            (Field::Gender, FieldValue::Image(_)) => {
                return Err(Error::InvalidValue {
                    field,
                    expected: "male or female",
                });
            }
            (field, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = text;
                }
            }
            (field, FieldValue::Cleared) => {
                if let Some(slot) = self.text_mut(field) {
                    slot.clear();
                }
            }
            (field, _) => {
                return Err(Error::InvalidValue {
                    field,
                    expected: "text",
                });
            }
        }
        Ok(())
    }
}
