//! Primitive types shared by the form model, store and validator

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every input kind the form builder palette offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    ShortText,
    LongText,
    Radio,
    Checkbox,
    Dropdown,
    Number,
    Range,
    Date,
    Time,
    Boolean,
    Rating,
    Email,
    Phone,
    File,
    Gender,
}

impl FieldType {
    pub const ALL: [FieldType; 15] = [
        FieldType::ShortText,
        FieldType::LongText,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Dropdown,
        FieldType::Number,
        FieldType::Range,
        FieldType::Date,
        FieldType::Time,
        FieldType::Boolean,
        FieldType::Rating,
        FieldType::Email,
        FieldType::Phone,
        FieldType::File,
        FieldType::Gender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::ShortText => "shortText",
            FieldType::LongText => "longText",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Dropdown => "dropdown",
            FieldType::Number => "number",
            FieldType::Range => "range",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Boolean => "boolean",
            FieldType::Rating => "rating",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::File => "file",
            FieldType::Gender => "gender",
        }
    }

    /// Whether the field is answered by picking from `options`
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Radio | FieldType::Checkbox | FieldType::Dropdown | FieldType::Gender
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown field type: {}", s))
    }
}

/// Publication state of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormStatus::Draft => write!(f, "draft"),
            FormStatus::Published => write!(f, "published"),
        }
    }
}

/// State of a stored response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Submitted,
    InProgress,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::InProgress => write!(f, "in-progress"),
        }
    }
}

/// State of a user's relationship with a form ("My Forms")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    InProgress,
    Submitted,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::InProgress => write!(f, "in-progress"),
            EntryStatus::Submitted => write!(f, "submitted"),
        }
    }
}

/// A single answer. Checkbox answers arrive as a list of selected options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty string or empty list. Whitespace-only text is not empty.
    pub fn is_empty_value(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value; text is parsed after trimming
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Bool(_) | FieldValue::List(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Answers keyed by field id
pub type FieldValues = BTreeMap<String, FieldValue>;
