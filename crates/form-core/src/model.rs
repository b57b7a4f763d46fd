//! Form, section, field, submission and template data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::types::{EntryStatus, FieldType, FieldValue, FieldValues, FormStatus, SubmissionStatus};

/// Title used when a form title is blank after trimming
pub const UNTITLED_FORM: &str = "Untitled Form";
pub const UNTITLED_SECTION: &str = "Untitled Section";
pub const SECTION_DESCRIPTION: &str = "Section description";
pub const UNTITLED_QUESTION: &str = "Untitled Question";

/// Default upper bound of a rating field
pub const DEFAULT_RATING_MAX: f64 = 5.0;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trim a form title, falling back to [`UNTITLED_FORM`] when nothing is left
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_FORM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One input definition inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl FormField {
    /// Build the default field the palette drops in for `field_type`
    pub fn for_type(field_type: FieldType) -> Self {
        let mut field = Self {
            id: new_id(),
            field_type,
            label: UNTITLED_QUESTION.to_string(),
            placeholder: None,
            help_text: None,
            default_value: None,
            required: false,
            options: None,
            min: None,
            max: None,
            step: None,
            regex: None,
        };

        match field_type {
            FieldType::Radio | FieldType::Checkbox | FieldType::Dropdown => {
                field.options = Some(vec!["Option 1".to_string(), "Option 2".to_string()]);
            }
            FieldType::Gender => {
                field.options = Some(vec!["Male".to_string(), "Female".to_string()]);
            }
            FieldType::Rating => {
                field.min = Some(1.0);
                field.max = Some(DEFAULT_RATING_MAX);
            }
            FieldType::Number => {
                field.step = Some(1.0);
            }
            FieldType::Range => {
                field.min = Some(0.0);
                field.max = Some(100.0);
                field.step = Some(1.0);
            }
            FieldType::ShortText | FieldType::LongText => {
                field.placeholder = Some("Your answer".to_string());
            }
            FieldType::Email => {
                field.placeholder = Some("name@example.com".to_string());
            }
            FieldType::Phone => {
                field.placeholder = Some("07XXXXXXXX".to_string());
            }
            FieldType::Date | FieldType::Time | FieldType::Boolean | FieldType::File => {}
        }

        field
    }

    /// Apply every member present in `patch`
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(help_text) = patch.help_text {
            self.help_text = help_text;
        }
        if let Some(default_value) = patch.default_value {
            self.default_value = default_value;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(min) = patch.min {
            self.min = min;
        }
        if let Some(max) = patch.max {
            self.max = max;
        }
        if let Some(step) = patch.step {
            self.step = step;
        }
        if let Some(regex) = patch.regex {
            self.regex = regex;
        }
    }
}

/// A named, ordered group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSection {
    pub fn empty() -> Self {
        Self {
            id: new_id(),
            title: UNTITLED_SECTION.to_string(),
            description: SECTION_DESCRIPTION.to_string(),
            fields: Vec::new(),
        }
    }

    /// Structural copy of the section and all of its fields.
    ///
    /// Ids are kept, so the copy compares equal to its source, but the copy
    /// owns every field and never aliases the original.
    pub fn deep_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            fields: self.fields.to_vec(),
        }
    }

    pub fn apply(&mut self, patch: SectionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }
}

/// Deep-copy a whole section list
pub fn copy_sections(sections: &[FormSection]) -> Vec<FormSection> {
    sections.iter().map(FormSection::deep_copy).collect()
}

/// One completed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: String,
    pub user_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub values: FieldValues,
    pub status: SubmissionStatus,
}

/// The form itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormModel {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub access_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: FormStatus,
    pub allow_multiple_submissions: bool,
    pub anonymous_responses: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<DateTime<Utc>>,
    pub sections: Vec<FormSection>,
    #[serde(default)]
    pub submissions: Vec<FormSubmission>,
}

impl FormModel {
    /// A closing date in the past closes the form whatever its status
    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        self.closing_date.is_some_and(|closing| closing < now)
    }

    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.status == FormStatus::Published && !self.is_closed(now)
    }

    /// All fields in section order
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn find_field(&self, field_id: &str) -> Option<&FormField> {
        self.fields().find(|f| f.id == field_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub(crate) fn apply(&mut self, patch: FormPatch) {
        if let Some(title) = patch.title {
            self.title = normalize_title(&title);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(allow) = patch.allow_multiple_submissions {
            self.allow_multiple_submissions = allow;
        }
        if let Some(anonymous) = patch.anonymous_responses {
            self.anonymous_responses = anonymous;
        }
        if let Some(closing_date) = patch.closing_date {
            self.closing_date = closing_date;
        }
        if let Some(sections) = patch.sections {
            self.sections = sections;
        }
    }
}

/// Per-(access key, user) tracking row behind "My Forms" and draft resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormEntry {
    pub form_id: String,
    pub access_key: String,
    pub user_id: Option<String>,
    pub status: EntryStatus,
    pub first_opened_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_values: Option<FieldValues>,
}

/// Reusable section/field skeleton. Never carries an access key or responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub template_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sections: Vec<FormSection>,
}

impl Template {
    pub fn section(&self, section_id: &str) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub(crate) fn apply(&mut self, patch: TemplatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(sections) = patch.sections {
            self.sections = sections;
        }
    }
}

/// Distinguishes an absent member (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Initial values for `create_form`; anything left out gets the default
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<FormStatus>,
    pub allow_multiple_submissions: Option<bool>,
    pub anonymous_responses: Option<bool>,
    pub closing_date: Option<DateTime<Utc>>,
    pub sections: Option<Vec<FormSection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<FormStatus>,
    #[serde(default)]
    pub allow_multiple_submissions: Option<bool>,
    #[serde(default)]
    pub anonymous_responses: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub closing_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub sections: Option<Vec<FormSection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub help_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub default_value: Option<Option<FieldValue>>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub options: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub step: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub regex: Option<Option<String>>,
}

/// Input for `add_template`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub sections: Vec<FormSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub sections: Option<Vec<FormSection>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Survey  "), "Survey");
        assert_eq!(normalize_title("   "), UNTITLED_FORM);
        assert_eq!(normalize_title(""), UNTITLED_FORM);
    }

    #[test]
    fn test_default_fields_per_type() {
        let radio = FormField::for_type(FieldType::Radio);
        assert_eq!(radio.options.as_ref().map(Vec::len), Some(2));

        let rating = FormField::for_type(FieldType::Rating);
        assert_eq!(rating.min, Some(1.0));
        assert_eq!(rating.max, Some(5.0));

        let number = FormField::for_type(FieldType::Number);
        assert_eq!(number.step, Some(1.0));
        assert!(number.options.is_none());

        let gender = FormField::for_type(FieldType::Gender);
        assert_eq!(
            gender.options,
            Some(vec!["Male".to_string(), "Female".to_string()])
        );
    }

    #[test]
    fn test_every_choice_type_gets_options() {
        for t in FieldType::ALL {
            let field = FormField::for_type(t);
            assert_eq!(field.options.is_some(), t.has_options(), "{}", t);
        }
    }

    #[test]
    fn test_deep_copy_does_not_alias() {
        let mut section = FormSection::empty();
        section.fields.push(FormField::for_type(FieldType::ShortText));

        let mut copy = section.deep_copy();
        assert_eq!(copy, section);

        copy.fields[0].label = "Changed".to_string();
        assert_eq!(section.fields[0].label, UNTITLED_QUESTION);
    }

    #[test]
    fn test_field_patch_clears_with_null() {
        let mut field = FormField::for_type(FieldType::Number);
        field.min = Some(3.0);

        let patch: FieldPatch =
            serde_json::from_str(r#"{"label":"Age","min":null,"required":true}"#).unwrap();
        field.apply(patch);

        assert_eq!(field.label, "Age");
        assert_eq!(field.min, None);
        assert!(field.required);
        // Absent members are left alone
        assert_eq!(field.step, Some(1.0));
    }

    #[test]
    fn test_form_closed_by_date() {
        let now = Utc::now();
        let form = FormModel {
            id: new_id(),
            title: "Closed".into(),
            description: String::new(),
            category: None,
            access_key: "ABCDEFGH".into(),
            created_at: now,
            updated_at: now,
            status: FormStatus::Published,
            allow_multiple_submissions: false,
            anonymous_responses: false,
            closing_date: Some(now - Duration::hours(1)),
            sections: vec![FormSection::empty()],
            submissions: vec![],
        };
        assert!(form.is_closed(now));
        assert!(!form.accepts_submissions(now));
    }

    #[test]
    fn test_form_serializes_camel_case() {
        let field = FormField::for_type(FieldType::ShortText);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "shortText");
        assert!(json.get("helpText").is_none());
        assert_eq!(json["required"], false);
    }
}
