//! Error types for the forms API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use form_core::{FieldErrors, FormError, SubmitRejection};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Submission failed validation")]
    Validation(FieldErrors),

    #[error("Form is not accepting responses")]
    NotPublished,

    #[error("Form closed for responses")]
    Closed,
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::IndexOutOfRange { .. } => ApiError::InvalidRequest(err.to_string()),
            FormError::FormNotFound(_)
            | FormError::TemplateNotFound(_)
            | FormError::SectionNotFound(_)
            | FormError::FieldNotFound(_)
            | FormError::SubmissionNotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<SubmitRejection> for ApiError {
    fn from(err: SubmitRejection) -> Self {
        match err {
            SubmitRejection::FormNotFound(_) => ApiError::NotFound(err.to_string()),
            SubmitRejection::NotPublished => ApiError::NotPublished,
            SubmitRejection::Closed => ApiError::Closed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotPublished => StatusCode::FORBIDDEN,
            ApiError::Closed => StatusCode::GONE,
        };

        let mut body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        if let ApiError::Validation(fields) = &self {
            body["fields"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_map_to_status() {
        let not_found: ApiError = FormError::SectionNotFound("s1".into()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let range: ApiError = FormError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(range.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rejections_map_to_status() {
        let draft: ApiError = SubmitRejection::NotPublished.into();
        assert_eq!(draft.into_response().status(), StatusCode::FORBIDDEN);

        let closed: ApiError = SubmitRejection::Closed.into();
        assert_eq!(closed.into_response().status(), StatusCode::GONE);
    }
}
