//! Field value validation
//!
//! Checks run in a fixed order and stop at the first failure, so the message
//! a caller sees depends on that order:
//!
//! 1. required / empty
//! 2. empty optional values short-circuit to valid
//! 3. type-specific shape and bounds
//! 4. the field's own regex, for text values

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::model::{FormField, FormModel, DEFAULT_RATING_MAX};
use crate::types::{FieldType, FieldValue, FieldValues};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number (07XXXXXXXX)";
pub const NUMBER_MESSAGE: &str = "Please enter a valid number";
pub const DATE_MESSAGE: &str = "Please enter a valid date";
pub const TIME_MESSAGE: &str = "Please enter a valid time (HH:MM)";
pub const PATTERN_MESSAGE: &str = "Value does not match the required format";

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Iraqi mobile numbers: 07 followed by an operator digit and 7 digits
    static ref PHONE_PATTERN: Regex = Regex::new(r"^07[3789]\d{7}$").unwrap();

    /// 24-hour clock, leading zero on the hour optional
    static ref TIME_PATTERN: Regex = Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").unwrap();
}

/// Datetime layouts accepted for date fields besides RFC 3339 / RFC 2822
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Outcome of validating one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Per-field messages keyed by field id
pub type FieldErrors = BTreeMap<String, String>;

/// Validate one value against a field type and its constraints
pub fn validate_field_value(
    value: Option<&FieldValue>,
    field_type: FieldType,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    regex: Option<&str>,
) -> ValidationResult {
    let missing = value.map_or(true, FieldValue::is_empty_value);
    if required && missing {
        return ValidationResult::invalid(REQUIRED_MESSAGE);
    }

    // Empty lists are not short-circuited here; they fall through to the
    // type checks like any other value
    let value = match value {
        None => return ValidationResult::ok(),
        Some(FieldValue::Text(s)) if !required && s.is_empty() => return ValidationResult::ok(),
        Some(v) => v,
    };

    if let Err(message) = check_type(value, field_type, min, max) {
        return ValidationResult::invalid(message);
    }

    if let (Some(pattern), FieldValue::Text(text)) = (regex, value) {
        // A pattern that fails to compile imposes no constraint
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(text) {
                return ValidationResult::invalid(PATTERN_MESSAGE);
            }
        }
    }

    ValidationResult::ok()
}

/// Validate a value against a field definition
pub fn validate_field(field: &FormField, value: Option<&FieldValue>) -> ValidationResult {
    validate_field_value(
        value,
        field.field_type,
        field.required,
        field.min,
        field.max,
        field.regex.as_deref(),
    )
}

/// Validate a full answer set against every field of the form.
///
/// Values keyed by ids the form does not define are ignored.
pub fn validate_submission(form: &FormModel, values: &FieldValues) -> Result<(), FieldErrors> {
    let errors: FieldErrors = form
        .fields()
        .filter_map(|field| {
            validate_field(field, values.get(&field.id))
                .error
                .map(|message| (field.id.clone(), message))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_type(
    value: &FieldValue,
    field_type: FieldType,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), String> {
    match field_type {
        FieldType::Email => match value.as_text() {
            Some(text) if EMAIL_PATTERN.is_match(text) => Ok(()),
            _ => Err(EMAIL_MESSAGE.to_string()),
        },
        FieldType::Phone => {
            let cleaned: Option<String> = value
                .as_text()
                .map(|text| text.chars().filter(|c| !c.is_whitespace()).collect());
            match cleaned {
                Some(digits) if PHONE_PATTERN.is_match(&digits) => Ok(()),
                _ => Err(PHONE_MESSAGE.to_string()),
            }
        }
        FieldType::Number | FieldType::Range => {
            let n = finite_number(value).ok_or_else(|| NUMBER_MESSAGE.to_string())?;
            check_bounds(n, min, max)
        }
        FieldType::Rating => {
            let upper = max.unwrap_or(DEFAULT_RATING_MAX);
            match finite_number(value) {
                Some(n) if (1.0..=upper).contains(&n) => Ok(()),
                _ => Err(format!("Rating must be between 1 and {}", upper)),
            }
        }
        FieldType::Date => match value.as_text() {
            Some(text) if parses_as_date(text) => Ok(()),
            _ => Err(DATE_MESSAGE.to_string()),
        },
        FieldType::Time => match value.as_text() {
            Some(text) if TIME_PATTERN.is_match(text) => Ok(()),
            _ => Err(TIME_MESSAGE.to_string()),
        },
        FieldType::ShortText
        | FieldType::LongText
        | FieldType::Radio
        | FieldType::Checkbox
        | FieldType::Dropdown
        | FieldType::Boolean
        | FieldType::File
        | FieldType::Gender => Ok(()),
    }
}

fn finite_number(value: &FieldValue) -> Option<f64> {
    value.as_number().filter(|n| n.is_finite())
}

fn check_bounds(n: f64, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    if let Some(min) = min {
        if n < min {
            return Err(format!("Value must be at least {}", min));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(format!("Value must be at most {}", max));
        }
    }
    Ok(())
}

fn parses_as_date(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_rfc2822(text).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(text, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormSection, FormField};
    use crate::store::FormStore;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn check(value: FieldValue, field_type: FieldType, required: bool) -> ValidationResult {
        validate_field_value(Some(&value), field_type, required, None, None, None)
    }

    #[test]
    fn test_required_empty_string_is_invalid() {
        let result = check(text(""), FieldType::ShortText, true);
        assert_eq!(result, ValidationResult::invalid(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_optional_empty_string_is_valid() {
        assert!(check(text(""), FieldType::ShortText, false).valid);
        assert!(check(text(""), FieldType::Email, false).valid);
        assert!(validate_field_value(None, FieldType::Number, false, Some(1.0), None, None).valid);
    }

    #[test]
    fn test_required_missing_and_empty_list() {
        assert!(!validate_field_value(None, FieldType::Date, true, None, None, None).valid);
        assert!(!check(FieldValue::List(vec![]), FieldType::Checkbox, true).valid);
        assert!(check(FieldValue::List(vec![]), FieldType::Checkbox, false).valid);
    }

    #[test]
    fn test_email() {
        let bad = check(text("not-an-email"), FieldType::Email, true);
        assert_eq!(bad.error.as_deref(), Some(EMAIL_MESSAGE));
        assert!(check(text("user@example.com"), FieldType::Email, true).valid);
        assert!(!check(text("user@example"), FieldType::Email, true).valid);
        assert!(!check(text("us er@example.com"), FieldType::Email, true).valid);
    }

    #[test]
    fn test_phone() {
        assert!(check(text("0770123456"), FieldType::Phone, true).valid);
        assert!(check(text("078 012 3456"), FieldType::Phone, true).valid);
        assert!(!check(text("0760123456"), FieldType::Phone, true).valid);
        assert!(!check(text("077012345"), FieldType::Phone, true).valid);
        assert!(!check(text("077-012-3456"), FieldType::Phone, true).valid);
        assert!(!check(FieldValue::Number(770123456.0), FieldType::Phone, true).valid);
    }

    #[test]
    fn test_number_bounds_cite_the_breached_bound() {
        let over = validate_field_value(
            Some(&FieldValue::Number(150.0)),
            FieldType::Number,
            true,
            Some(0.0),
            Some(100.0),
            None,
        );
        assert_eq!(over.error.as_deref(), Some("Value must be at most 100"));

        let under = validate_field_value(
            Some(&text("-2")),
            FieldType::Range,
            true,
            Some(0.0),
            Some(100.0),
            None,
        );
        assert_eq!(under.error.as_deref(), Some("Value must be at least 0"));

        let inside = validate_field_value(
            Some(&text("100")),
            FieldType::Number,
            true,
            Some(0.0),
            Some(100.0),
            None,
        );
        assert!(inside.valid);
    }

    #[test]
    fn test_number_must_be_finite() {
        assert_eq!(
            check(text("abc"), FieldType::Number, true).error.as_deref(),
            Some(NUMBER_MESSAGE)
        );
        assert!(!check(text("inf"), FieldType::Number, true).valid);
        assert!(!check(FieldValue::Bool(true), FieldType::Range, true).valid);
    }

    #[test]
    fn test_rating_range() {
        assert!(check(FieldValue::Number(5.0), FieldType::Rating, true).valid);
        assert_eq!(
            check(FieldValue::Number(6.0), FieldType::Rating, true)
                .error
                .as_deref(),
            Some("Rating must be between 1 and 5")
        );
        assert!(!check(FieldValue::Number(0.0), FieldType::Rating, true).valid);
        let ten = validate_field_value(
            Some(&FieldValue::Number(9.0)),
            FieldType::Rating,
            true,
            None,
            Some(10.0),
            None,
        );
        assert!(ten.valid);
    }

    #[test]
    fn test_date_and_time() {
        assert!(check(text("2024-03-01"), FieldType::Date, true).valid);
        assert!(check(text("2024-03-01T10:30:00Z"), FieldType::Date, true).valid);
        assert!(check(text("03/01/2024"), FieldType::Date, true).valid);
        assert!(!check(text("yesterday"), FieldType::Date, true).valid);

        assert!(check(text("23:59"), FieldType::Time, true).valid);
        assert!(check(text("9:05"), FieldType::Time, true).valid);
        assert_eq!(
            check(text("24:00"), FieldType::Time, true).error.as_deref(),
            Some(TIME_MESSAGE)
        );
    }

    #[test]
    fn test_regex_runs_after_type_checks() {
        let result = validate_field_value(
            Some(&text("-5")),
            FieldType::Number,
            true,
            Some(0.0),
            None,
            Some(r"^\d+$"),
        );
        assert_eq!(result.error.as_deref(), Some("Value must be at least 0"));

        let pattern = validate_field_value(
            Some(&text("abc")),
            FieldType::ShortText,
            true,
            None,
            None,
            Some(r"^\d+$"),
        );
        assert_eq!(pattern.error.as_deref(), Some(PATTERN_MESSAGE));
    }

    #[test]
    fn test_broken_regex_is_ignored() {
        let result = validate_field_value(
            Some(&text("anything")),
            FieldType::ShortText,
            true,
            None,
            None,
            Some("(unclosed"),
        );
        assert!(result.valid);
    }

    #[test]
    fn test_untyped_choices_accept_anything_present() {
        for t in [FieldType::Radio, FieldType::Dropdown, FieldType::Gender, FieldType::File] {
            assert!(check(text("x"), t, true).valid);
        }
        assert!(check(FieldValue::Bool(false), FieldType::Boolean, true).valid);
    }

    #[test]
    fn test_validate_submission_collects_per_field_errors() {
        let mut store = FormStore::new();
        let form = store.create_form(Default::default());

        let mut email = FormField::for_type(FieldType::Email);
        email.required = true;
        let mut age = FormField::for_type(FieldType::Number);
        age.min = Some(18.0);
        let name = FormField::for_type(FieldType::ShortText);

        let mut section = FormSection::empty();
        section.fields = vec![email.clone(), age.clone(), name.clone()];
        let mut form = store.get_form_by_id(&form.id).cloned().unwrap();
        form.sections = vec![section];

        let mut values = FieldValues::new();
        values.insert(age.id.clone(), FieldValue::Number(12.0));
        values.insert("unknown".to_string(), text("ignored"));

        let errors = validate_submission(&form, &values).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&email.id], REQUIRED_MESSAGE);
        assert_eq!(errors[&age.id], "Value must be at least 18");

        values.insert(email.id.clone(), text("a@b.co"));
        values.insert(age.id.clone(), FieldValue::Number(30.0));
        assert!(validate_submission(&form, &values).is_ok());
    }
}
