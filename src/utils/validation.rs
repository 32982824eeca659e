use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// `<non-whitespace>+@<non-whitespace>+.<non-whitespace>+`, matched against the trimmed value.
pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"));

/// Raw employee payload as submitted by a client. Absent keys and `null` are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub joining_date: Option<String>,
}

/// The four business fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub department: String,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Department,
    JoiningDate,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Department, Field::JoiningDate];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Missing,
    Invalid,
}

/// Every failing field of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: Field, err: FieldError) {
        self.0.entry(field).or_insert(err);
    }

    /// Single message reported by the API. Presence failures win over format failures.
    pub fn server_message(&self) -> &'static str {
        if self.0.values().any(|err| *err == FieldError::Missing) {
            "Missing required fields"
        } else if self.get(Field::Email) == Some(FieldError::Invalid) {
            "Invalid email format"
        } else {
            "Invalid joining date"
        }
    }

    /// Message shown next to one form field, if that field failed.
    pub fn form_message(&self, field: Field) -> Option<&'static str> {
        let message = match (field, self.get(field)?) {
            (Field::Name, _) => "Name is required",
            (Field::Email, FieldError::Missing) => "Email is required",
            (Field::Email, FieldError::Invalid) => "Email is invalid",
            (Field::Department, _) => "Department is required",
            (Field::JoiningDate, FieldError::Missing) => "Joining date is required",
            (Field::JoiningDate, FieldError::Invalid) => "Joining date is invalid",
        };
        Some(message)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.server_message())
    }
}

#[derive(Validate)]
struct FormatDraft {
    #[validate(regex = "EMAIL_PATTERN")]
    email: String,
    #[validate(custom = "validate_joining_date")]
    joining_date: String,
}

fn validate_joining_date(value: &str) -> Result<(), ValidationError> {
    if parse_joining_date(value).is_none() {
        return Err(ValidationError::new("Joining date must be YYYY-MM-DD"));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose calendar date is taken.
pub fn parse_joining_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Presence first, then format; every failing field is reported together.
pub fn validate_employee(input: &EmployeeInput) -> Result<EmployeeFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = present(&input.name);
    let email = present(&input.email);
    let department = present(&input.department);
    let joining_date = present(&input.joining_date);

    for (field, value) in [
        (Field::Name, name),
        (Field::Email, email),
        (Field::Department, department),
        (Field::JoiningDate, joining_date),
    ] {
        if value.is_none() {
            errors.insert(field, FieldError::Missing);
        }
    }

    let draft = FormatDraft {
        email: email.unwrap_or_default().to_string(),
        joining_date: joining_date.unwrap_or_default().to_string(),
    };
    if let Err(report) = draft.validate() {
        for key in report.field_errors().keys() {
            match *key {
                "email" => errors.insert(Field::Email, FieldError::Invalid),
                "joining_date" => errors.insert(Field::JoiningDate, FieldError::Invalid),
                _ => {}
            }
        }
    }

    match (name, email, department, joining_date.and_then(parse_joining_date)) {
        (Some(name), Some(email), Some(department), Some(joining_date)) if errors.is_empty() => {
            Ok(EmployeeFields {
                name: name.to_string(),
                email: email.to_string(),
                department: department.to_string(),
                joining_date,
            })
        }
        _ => Err(errors),
    }
}
