use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(String),

    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Why a submission was refused. These are expected outcomes, not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("No form matches access key {0}")]
    FormNotFound(String),

    #[error("Form is not accepting responses")]
    NotPublished,

    #[error("Form closed for responses")]
    Closed,
}
