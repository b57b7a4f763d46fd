//! End-user endpoints: opening a form by access key, drafts, submissions

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use form_core::{validate_submission, FieldValues, FormStatus, FormSubmission, UserFormEntry};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{AccessResponse, AnswersRequest, UserQuery};
use crate::state::AppState;

fn key_not_found(key: &str) -> ApiError {
    ApiError::NotFound(format!("No form for access key: {}", key))
}

/// Handler: GET /api/access/:key?userId=
///
/// Returns the form without other people's responses. When a user id is
/// given, the visit is recorded in that user's "My Forms" list.
pub async fn open_form(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<AccessResponse>, ApiError> {
    let mut store = state.store.write().await;
    let entry = match query.user_id.as_deref() {
        Some(user_id) => Some(store.track_form_access(&key, Some(user_id))?),
        None => None,
    };

    let mut form = store
        .get_form_by_access_key(&key)
        .cloned()
        .ok_or_else(|| key_not_found(&key))?;
    form.submissions.clear();

    Ok(Json(AccessResponse {
        accepting_responses: form.accepts_submissions(Utc::now()),
        form,
        entry,
    }))
}

/// Handler: POST /api/access/:key/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(req): Json<AnswersRequest>,
) -> Result<(StatusCode, Json<FormSubmission>), ApiError> {
    let mut store = state.store.write().await;

    let form = store
        .get_form_by_access_key(&key)
        .ok_or_else(|| key_not_found(&key))?;
    if form.status != FormStatus::Published {
        return Err(ApiError::NotPublished);
    }
    if form.is_closed(Utc::now()) {
        return Err(ApiError::Closed);
    }
    if let Err(fields) = validate_submission(form, &req.values) {
        debug!("Submission to {} failed on {} field(s)", form.id, fields.len());
        return Err(ApiError::Validation(fields));
    }

    let submission = store.submit_form(&key, req.values, req.user_id.as_deref())?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// Handler: PUT /api/access/:key/draft
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(req): Json<AnswersRequest>,
) -> Result<Json<UserFormEntry>, ApiError> {
    let entry = state
        .store
        .write()
        .await
        .save_draft(&key, req.values, req.user_id.as_deref())?;
    Ok(Json(entry))
}

/// Handler: GET /api/access/:key/draft?userId=
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<FieldValues>, ApiError> {
    let store = state.store.read().await;
    let draft = store
        .get_draft(&key, query.user_id.as_deref())
        .ok_or_else(|| ApiError::NotFound(format!("No draft saved for {}", key)))?;
    Ok(Json(draft.clone()))
}

/// Handler: DELETE /api/access/:key/draft?userId=
pub async fn delete_draft(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .store
        .write()
        .await
        .delete_user_form_draft(&key, query.user_id.as_deref());
    if !removed {
        return Err(ApiError::NotFound(format!("No draft saved for {}", key)));
    }
    info!("Draft for {} discarded", key);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: GET /api/users/:user_id/forms
pub async fn list_user_forms(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<UserFormEntry>> {
    let store = state.store.read().await;
    let entries = store
        .get_user_forms(Some(user_id.as_str()))
        .into_iter()
        .cloned()
        .collect();
    Json(entries)
}

/// Handler: GET /api/users/:user_id/forms/:key
pub async fn get_user_form(
    State(state): State<Arc<AppState>>,
    Path((user_id, key)): Path<(String, String)>,
) -> Result<Json<UserFormEntry>, ApiError> {
    let store = state.store.read().await;
    let entry = store
        .get_user_form_by_access_key(&key, Some(user_id.as_str()))
        .ok_or_else(|| {
            ApiError::NotFound(format!("User {} has not opened {}", user_id, key))
        })?;
    Ok(Json(entry.clone()))
}
