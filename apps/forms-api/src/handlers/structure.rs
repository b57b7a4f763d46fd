//! Section and field editing endpoints for forms and templates

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use form_core::{FieldPatch, FormField, FormSection, SectionPatch};

use crate::error::ApiError;
use crate::models::{AddFieldRequest, MoveFieldRequest, ReorderSectionsRequest};
use crate::state::AppState;

// ============================================================
// Forms
// ============================================================

/// Handler: POST /api/forms/:id/sections
pub async fn add_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<FormSection>), ApiError> {
    let section = state.store.write().await.add_section(&id)?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// Handler: PATCH /api/forms/:id/sections/:section_id
pub async fn update_section(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
    Json(patch): Json<SectionPatch>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .update_section(&id, &section_id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: DELETE /api/forms/:id/sections/:section_id
pub async fn delete_section(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_section(&id, &section_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/forms/:id/reorder-sections
pub async fn reorder_sections(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReorderSectionsRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .reorder_sections(&id, req.from_index, req.to_index)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/forms/:id/sections/:section_id/fields
pub async fn add_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
    Json(req): Json<AddFieldRequest>,
) -> Result<(StatusCode, Json<FormField>), ApiError> {
    let field = state
        .store
        .write()
        .await
        .add_field(&id, &section_id, req.field_type)?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Handler: PATCH /api/forms/:id/sections/:section_id/fields/:field_id
pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, field_id)): Path<(String, String, String)>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<FormField>, ApiError> {
    let field = state
        .store
        .write()
        .await
        .update_field(&id, &section_id, &field_id, patch)?;
    Ok(Json(field))
}

/// Handler: DELETE /api/forms/:id/sections/:section_id/fields/:field_id
pub async fn delete_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, field_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .delete_field(&id, &section_id, &field_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/forms/:id/move-field
pub async fn move_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveFieldRequest>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.move_field(
        &id,
        &req.source_section_id,
        &req.dest_section_id,
        req.source_index,
        req.dest_index,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Templates
// ============================================================

/// Handler: POST /api/templates/:id/sections
pub async fn add_template_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<FormSection>), ApiError> {
    let section = state.store.write().await.add_template_section(&id)?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// Handler: PATCH /api/templates/:id/sections/:section_id
pub async fn update_template_section(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
    Json(patch): Json<SectionPatch>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .update_template_section(&id, &section_id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: DELETE /api/templates/:id/sections/:section_id
pub async fn delete_template_section(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .delete_template_section(&id, &section_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/templates/:id/reorder-sections
pub async fn reorder_template_sections(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReorderSectionsRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .reorder_template_sections(&id, req.from_index, req.to_index)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/templates/:id/sections/:section_id/fields
pub async fn add_template_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
    Json(req): Json<AddFieldRequest>,
) -> Result<(StatusCode, Json<FormField>), ApiError> {
    let field = state
        .store
        .write()
        .await
        .add_template_field(&id, &section_id, req.field_type)?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Handler: PATCH /api/templates/:id/sections/:section_id/fields/:field_id
pub async fn update_template_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, field_id)): Path<(String, String, String)>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<FormField>, ApiError> {
    let field = state
        .store
        .write()
        .await
        .update_template_field(&id, &section_id, &field_id, patch)?;
    Ok(Json(field))
}

/// Handler: DELETE /api/templates/:id/sections/:section_id/fields/:field_id
pub async fn delete_template_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, field_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .delete_template_field(&id, &section_id, &field_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: POST /api/templates/:id/move-field
pub async fn move_template_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveFieldRequest>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.move_template_field(
        &id,
        &req.source_section_id,
        &req.dest_section_id,
        req.source_index,
        req.dest_index,
    )?;
    Ok(StatusCode::NO_CONTENT)
}
