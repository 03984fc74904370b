use crate::models::{Field, Gender, ProfileDraft};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Minimum age accepted by the form
pub const MIN_AGE: u32 = 18;

pub const NAME_REQUIRED: &str = "Name is required";
pub const SURNAME_REQUIRED: &str = "Surname is required";
pub const AGE_TOO_LOW: &str = "You must be at least 18 years old";
pub const GENDER_REQUIRED: &str = "Please select your gender";

/// Field-level error messages, in form display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the entry for a field the user is editing
    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::new();
        for (name, field_errors) in errors.field_errors() {
            let Ok(field) = name.to_string().parse::<Field>() else {
                continue;
            };
            if let Some(message) = field_errors.iter().find_map(|e| e.message.clone()) {
                out.insert(field, message.into_owned());
            }
        }
        out
    }
}

/// Validate a draft and collect one message per failing field
///
/// Pure and total: any draft, however malformed, yields a (possibly empty)
/// error map. The bio has no rule; its length is capped on input.
pub fn validate_draft(draft: &ProfileDraft) -> ValidationErrors {
    match draft.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors.into(),
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn required_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", NAME_REQUIRED));
    }
    Ok(())
}

pub(crate) fn required_surname(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", SURNAME_REQUIRED));
    }
    Ok(())
}

pub(crate) fn adult_age(value: &str) -> Result<(), ValidationError> {
    let raw = value.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(rule_error("min_age", AGE_TOO_LOW));
    }

    // Too many digits for u64 is still an integer well past the minimum
    match digits.parse::<u64>() {
        Ok(age) if age < u64::from(MIN_AGE) => Err(rule_error("min_age", AGE_TOO_LOW)),
        _ => Ok(()),
    }
}

pub(crate) fn known_gender(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| rule_error("gender", GENDER_REQUIRED))
}
