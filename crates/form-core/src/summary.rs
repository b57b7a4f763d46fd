//! Response aggregation for dashboards

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::FormModel;
use crate::types::{FieldType, FieldValue, FormStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub field_id: String,
    pub label: String,
    pub field_type: FieldType,
    /// Submissions with a non-empty answer for this field
    pub answered: usize,
    /// Per-option tallies, only for option-bearing fields
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub option_counts: BTreeMap<String, usize>,
    /// Mean of numeric answers for number, range and rating fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub form_id: String,
    pub total_submissions: usize,
    pub last_submitted_at: Option<DateTime<Utc>>,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_forms: usize,
    pub published_forms: usize,
    pub draft_forms: usize,
    pub total_responses: usize,
}

fn is_numeric(field_type: FieldType) -> bool {
    matches!(
        field_type,
        FieldType::Number | FieldType::Range | FieldType::Rating
    )
}

pub fn summarize(form: &FormModel) -> FormSummary {
    let fields = form
        .fields()
        .map(|field| {
            let answers: Vec<&FieldValue> = form
                .submissions
                .iter()
                .filter_map(|s| s.values.get(&field.id))
                .filter(|v| !v.is_empty_value())
                .collect();

            let mut option_counts = BTreeMap::new();
            if field.field_type.has_options() {
                for answer in &answers {
                    match answer {
                        FieldValue::Text(choice) => {
                            *option_counts.entry(choice.clone()).or_insert(0) += 1;
                        }
                        FieldValue::List(choices) => {
                            for choice in choices {
                                *option_counts.entry(choice.clone()).or_insert(0) += 1;
                            }
                        }
                        FieldValue::Bool(_) | FieldValue::Number(_) => {}
                    }
                }
            }

            let average = if is_numeric(field.field_type) {
                let numbers: Vec<f64> = answers
                    .iter()
                    .filter_map(|v| v.as_number())
                    .filter(|n| n.is_finite())
                    .collect();
                if numbers.is_empty() {
                    None
                } else {
                    Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
                }
            } else {
                None
            };

            FieldSummary {
                field_id: field.id.clone(),
                label: field.label.clone(),
                field_type: field.field_type,
                answered: answers.len(),
                option_counts,
                average,
            }
        })
        .collect();

    FormSummary {
        form_id: form.id.clone(),
        total_submissions: form.submissions.len(),
        last_submitted_at: form.submissions.iter().map(|s| s.submitted_at).max(),
        fields,
    }
}

pub fn dashboard_stats(forms: &[FormModel]) -> DashboardStats {
    let published_forms = forms
        .iter()
        .filter(|f| f.status == FormStatus::Published)
        .count();

    DashboardStats {
        total_forms: forms.len(),
        published_forms,
        draft_forms: forms.len() - published_forms,
        total_responses: forms.iter().map(|f| f.submissions.len()).sum(),
    }
}
