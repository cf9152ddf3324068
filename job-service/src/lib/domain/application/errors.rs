use thiserror::Error;

use crate::domain::authz::errors::AccessError;

/// Error for ApplicationId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for application status parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationStatusError {
    #[error("Invalid status: {0} (expected pending, reviewed, accepted, or rejected)")]
    Unknown(String),
}

/// Error for resume link validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResumeLinkError {
    #[error("Resume link is required")]
    Empty,
}

/// Top-level error for all application-related operations
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    #[error("Invalid application ID: {0}")]
    InvalidApplicationId(#[from] ApplicationIdError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] ApplicationStatusError),

    #[error("Invalid resume link: {0}")]
    InvalidResumeLink(#[from] ResumeLinkError),

    #[error("Application not found: {0}")]
    NotFound(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Already applied for this job")]
    AlreadyApplied,

    #[error(transparent)]
    AccessDenied(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
