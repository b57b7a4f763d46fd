//! Router assembly

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, access, forms, structure, templates};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for the web builder and respondent pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/api/dashboard", get(handlers::dashboard))
        // Form lifecycle
        .route("/api/forms", get(forms::list_forms).post(forms::create_form))
        .route(
            "/api/forms/:id",
            get(forms::get_form)
                .patch(forms::update_form)
                .delete(forms::delete_form),
        )
        .route("/api/forms/:id/title", put(forms::update_form_title))
        .route("/api/forms/:id/duplicate", post(forms::duplicate_form))
        .route("/api/forms/:id/access-key", post(forms::regenerate_access_key))
        .route("/api/forms/:id/summary", get(forms::form_summary))
        .route("/api/forms/:id/template", post(forms::save_form_as_template))
        .route("/api/forms/:id/submissions", get(forms::list_submissions))
        .route(
            "/api/forms/:id/submissions/:submission_id",
            delete(forms::delete_submission),
        )
        // Form structure
        .route("/api/forms/:id/sections", post(structure::add_section))
        .route(
            "/api/forms/:id/sections/:section_id",
            patch(structure::update_section).delete(structure::delete_section),
        )
        .route(
            "/api/forms/:id/reorder-sections",
            post(structure::reorder_sections),
        )
        .route(
            "/api/forms/:id/sections/:section_id/fields",
            post(structure::add_field),
        )
        .route(
            "/api/forms/:id/sections/:section_id/fields/:field_id",
            patch(structure::update_field).delete(structure::delete_field),
        )
        .route("/api/forms/:id/move-field", post(structure::move_field))
        // Templates
        .route(
            "/api/templates",
            get(templates::list_templates).post(templates::add_template),
        )
        .route(
            "/api/templates/:id",
            get(templates::get_template)
                .patch(templates::update_template)
                .delete(templates::delete_template),
        )
        .route(
            "/api/templates/:id/duplicate",
            post(templates::duplicate_template),
        )
        .route(
            "/api/templates/:id/forms",
            post(templates::create_form_from_template),
        )
        .route(
            "/api/templates/:id/sections",
            post(structure::add_template_section),
        )
        .route(
            "/api/templates/:id/sections/:section_id",
            patch(structure::update_template_section).delete(structure::delete_template_section),
        )
        .route(
            "/api/templates/:id/reorder-sections",
            post(structure::reorder_template_sections),
        )
        .route(
            "/api/templates/:id/sections/:section_id/fields",
            post(structure::add_template_field),
        )
        .route(
            "/api/templates/:id/sections/:section_id/fields/:field_id",
            patch(structure::update_template_field).delete(structure::delete_template_field),
        )
        .route(
            "/api/templates/:id/move-field",
            post(structure::move_template_field),
        )
        // Respondents
        .route("/api/access/:key", get(access::open_form))
        .route("/api/access/:key/submit", post(access::submit))
        .route(
            "/api/access/:key/draft",
            get(access::get_draft)
                .put(access::save_draft)
                .delete(access::delete_draft),
        )
        .route("/api/users/:user_id/forms", get(access::list_user_forms))
        .route("/api/users/:user_id/forms/:key", get(access::get_user_form))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
