//! Form builder core
//!
//! This crate holds everything with real invariants in the form builder:
//! - the form/section/field/template data model
//! - the in-memory store with its structural editing, submission and draft
//!   lifecycle, and access-key addressing
//! - per-field value validation
//!
//! It performs no I/O. The HTTP service in `forms-api` wraps a [`FormStore`]
//! behind a lock.

pub mod access_key;
pub mod error;
pub mod model;
pub mod store;
pub mod summary;
pub mod types;
pub mod validation;

pub use error::{FormError, SubmitRejection};
pub use model::{
    FieldPatch, FormField, FormModel, FormOverrides, FormPatch, FormSection, FormSubmission,
    NewTemplate, SectionPatch, Template, TemplatePatch, UserFormEntry,
};
pub use store::{FormStore, SectionContainer};
pub use summary::{DashboardStats, FieldSummary, FormSummary};
pub use types::{EntryStatus, FieldType, FieldValue, FieldValues, FormStatus, SubmissionStatus};
pub use validation::{
    validate_field, validate_field_value, validate_submission, FieldErrors, ValidationResult,
};
