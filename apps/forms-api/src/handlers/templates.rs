//! Template endpoints (admin)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use form_core::{FormModel, NewTemplate, Template, TemplatePatch};

use crate::error::ApiError;
use crate::models::FromTemplateQuery;
use crate::state::AppState;

/// Handler: GET /api/templates
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<Template>> {
    Json(state.store.read().await.templates().to_vec())
}

/// Handler: POST /api/templates
pub async fn add_template(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTemplate>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Template name is required".into()));
    }
    let template = state.store.write().await.add_template(req);
    Ok((StatusCode::CREATED, Json(template)))
}

/// Handler: GET /api/templates/:id
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let store = state.store.read().await;
    let template = store
        .get_template_by_id(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Template not found: {}", id)))?;
    Ok(Json(template.clone()))
}

/// Handler: PATCH /api/templates/:id
pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TemplatePatch>,
) -> Result<Json<Template>, ApiError> {
    let template = state.store.write().await.update_template(&id, patch)?;
    Ok(Json(template))
}

/// Handler: DELETE /api/templates/:id
pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_template(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/templates/:id/duplicate
pub async fn duplicate_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let template = state.store.write().await.duplicate_template(&id)?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Handler: POST /api/templates/:id/forms?publish=true|false
pub async fn create_form_from_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<FromTemplateQuery>,
) -> Result<(StatusCode, Json<FormModel>), ApiError> {
    let mut store = state.store.write().await;
    let form = if query.publish {
        store.publish_template_as_form(&id)?
    } else {
        store.create_form_from_template(&id)?
    };
    Ok((StatusCode::CREATED, Json(form)))
}
