//! Form input contracts.
//!
//! Mutations receive urlencoded form fields (hidden-id inputs, date pickers,
//! checkboxes), so every value arrives as a string and is coerced here.
//! Validation runs across all fields of a contract and reports every
//! violation at once; callers render one message per offending field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::database::models::SocialPlatform;

/// Decoded urlencoded body: field name to raw submitted value
pub type FormFields = HashMap<String, String>;

/// Reserved key for operation-level (non-field) failures
pub const ROOT: &str = "root";

/// Field-keyed error map accumulated over a full validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn add_root(&mut self, message: impl Into<String>) {
        self.add(ROOT, message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Finish a validation pass: the parsed value if nothing failed,
    /// otherwise the accumulated error map.
    pub fn check<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn raw<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str).map(str::trim)
}

/// Required non-empty text
pub fn required_text(fields: &FormFields, name: &str, errors: &mut FieldErrors) -> Option<String> {
    match raw(fields, name) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            errors.add(name, "This field is required");
            None
        }
    }
}

/// Optional text; absent or empty coerces to None
pub fn optional_text(fields: &FormFields, name: &str) -> Option<String> {
    match raw(fields, name) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Optional identifier submitted as a hidden form field. Absent is fine;
/// present but non-numeric or non-positive is a field error.
pub fn optional_id(fields: &FormFields, name: &str, errors: &mut FieldErrors) -> Option<i64> {
    let value = raw(fields, name).filter(|v| !v.is_empty())?;
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(name, "Must be a positive integer");
            None
        }
    }
}

/// Required identifier (delete forms)
pub fn required_id(fields: &FormFields, name: &str, errors: &mut FieldErrors) -> Option<i64> {
    match raw(fields, name).filter(|v| !v.is_empty()) {
        None => {
            errors.add(name, "This field is required");
            None
        }
        Some(value) => match value.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                errors.add(name, "Must be a positive integer");
                None
            }
        },
    }
}

/// Required date; accepts date-only, datetime-local and RFC 3339 inputs
pub fn required_date(
    fields: &FormFields,
    name: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match raw(fields, name).filter(|v| !v.is_empty()) {
        None => {
            errors.add(name, "This field is required");
            None
        }
        Some(value) => match parse_date_value(value) {
            Some(date) => Some(date),
            None => {
                errors.add(name, "Must be a valid date");
                None
            }
        },
    }
}

/// Nullable date: absent or empty coerces to None ("ongoing"), anything
/// else must parse as a date.
pub fn nullable_date(
    fields: &FormFields,
    name: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    let value = raw(fields, name).filter(|v| !v.is_empty())?;
    match parse_date_value(value) {
        Some(date) => Some(date),
        None => {
            errors.add(name, "Must be a valid date");
            None
        }
    }
}

/// Checkbox semantics: an absent field means false
pub fn checkbox(fields: &FormFields, name: &str) -> bool {
    matches!(raw(fields, name), Some("on") | Some("true") | Some("1"))
}

/// Required absolute URL
pub fn required_url(fields: &FormFields, name: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = required_text(fields, name, errors)?;
    match url::Url::parse(&value) {
        Ok(_) => Some(value),
        Err(_) => {
            errors.add(name, "Must be a valid URL");
            None
        }
    }
}

/// Required social platform token
pub fn required_platform(
    fields: &FormFields,
    name: &str,
    errors: &mut FieldErrors,
) -> Option<SocialPlatform> {
    let value = required_text(fields, name, errors)?;
    match value.parse::<SocialPlatform>() {
        Ok(platform) => Some(platform),
        Err(()) => {
            errors.add(name, "Unknown platform");
            None
        }
    }
}

fn parse_date_value(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
