//! Request and response bodies for the forms API

use form_core::{FieldType, FieldValues, FormModel, FormStatus, UserFormEntry};
use serde::{Deserialize, Serialize};

/// Query for `GET /api/forms`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFormsQuery {
    pub status: Option<FormStatus>,
}

/// Identifies the caller on user-facing endpoints. Trusted as given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyResponse {
    pub access_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSectionsRequest {
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddFieldRequest {
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFieldRequest {
    pub source_section_id: String,
    pub dest_section_id: String,
    pub source_index: usize,
    pub dest_index: usize,
}

/// Body of submit and draft-save calls
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersRequest {
    #[serde(default)]
    pub values: FieldValues,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveAsTemplateRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FromTemplateQuery {
    #[serde(default)]
    pub publish: bool,
}

/// What an end user sees when opening an access link
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub form: FormModel,
    pub accepting_responses: bool,
    pub entry: Option<UserFormEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}
