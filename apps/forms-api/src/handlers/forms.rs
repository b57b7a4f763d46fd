//! Form lifecycle endpoints (admin)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use form_core::{FormModel, FormOverrides, FormPatch, FormSubmission, FormSummary, Template};
use tracing::info;

use crate::error::ApiError;
use crate::models::{AccessKeyResponse, ListFormsQuery, SaveAsTemplateRequest, UpdateTitleRequest};
use crate::state::AppState;

fn form_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Form not found: {}", id))
}

/// Handler: GET /api/forms
pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFormsQuery>,
) -> Json<Vec<FormModel>> {
    let store = state.store.read().await;
    let forms = match query.status {
        Some(status) => store
            .list_forms_by_status(status)
            .into_iter()
            .cloned()
            .collect(),
        None => store.forms().to_vec(),
    };
    Json(forms)
}

/// Handler: POST /api/forms
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    Json(overrides): Json<FormOverrides>,
) -> (StatusCode, Json<FormModel>) {
    let form = state.store.write().await.create_form(overrides);
    (StatusCode::CREATED, Json(form))
}

/// Handler: GET /api/forms/:id
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FormModel>, ApiError> {
    let store = state.store.read().await;
    let form = store.get_form_by_id(&id).ok_or_else(|| form_not_found(&id))?;
    Ok(Json(form.clone()))
}

/// Handler: PATCH /api/forms/:id
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<FormModel>, ApiError> {
    let form = state.store.write().await.update_form(&id, patch)?;
    Ok(Json(form))
}

/// Handler: PUT /api/forms/:id/title
pub async fn update_form_title(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTitleRequest>,
) -> Result<Json<FormModel>, ApiError> {
    let mut store = state.store.write().await;
    store.update_form_title(&id, &req.title)?;
    let form = store.get_form_by_id(&id).ok_or_else(|| form_not_found(&id))?;
    Ok(Json(form.clone()))
}

/// Handler: DELETE /api/forms/:id
pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_form(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/forms/:id/duplicate
pub async fn duplicate_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<FormModel>), ApiError> {
    let form = state.store.write().await.duplicate_form(&id)?;
    Ok((StatusCode::CREATED, Json(form)))
}

/// Handler: POST /api/forms/:id/access-key
pub async fn regenerate_access_key(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AccessKeyResponse>, ApiError> {
    let access_key = state.store.write().await.regenerate_access_key(&id)?;
    Ok(Json(AccessKeyResponse { access_key }))
}

/// Handler: GET /api/forms/:id/summary
pub async fn form_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FormSummary>, ApiError> {
    let summary = state
        .store
        .read()
        .await
        .summarize_form(&id)
        .ok_or_else(|| form_not_found(&id))?;
    Ok(Json(summary))
}

/// Handler: GET /api/forms/:id/submissions
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FormSubmission>>, ApiError> {
    let store = state.store.read().await;
    let submissions = store.get_submissions(&id).ok_or_else(|| form_not_found(&id))?;
    Ok(Json(submissions.to_vec()))
}

/// Handler: DELETE /api/forms/:id/submissions/:submission_id
pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path((id, submission_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .delete_submission(&id, &submission_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/forms/:id/template
pub async fn save_form_as_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<SaveAsTemplateRequest>>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let name = body.and_then(|Json(req)| req.name);
    let template = state.store.write().await.save_form_as_template(&id, name)?;
    info!("Form {} saved as template {}", id, template.template_id);
    Ok((StatusCode::CREATED, Json(template)))
}
