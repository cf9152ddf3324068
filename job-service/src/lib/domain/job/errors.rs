use thiserror::Error;

use crate::domain::authz::errors::AccessError;

/// Error for JobId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for employment type parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmploymentTypeError {
    #[error("Invalid employment type: {0} (expected full-time, part-time, internship, or any)")]
    Unknown(String),
}

/// Top-level error for all job-related operations
#[derive(Debug, Clone, Error)]
pub enum JobError {
    #[error("Invalid job ID: {0}")]
    InvalidJobId(#[from] JobIdError),

    #[error("Invalid employment type: {0}")]
    InvalidEmploymentType(#[from] EmploymentTypeError),

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    AccessDenied(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
