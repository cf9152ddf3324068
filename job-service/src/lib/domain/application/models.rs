use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::application::errors::ApplicationIdError;
use crate::application::errors::ApplicationStatusError;
use crate::application::errors::ResumeLinkError;
use crate::domain::identity::models::IdentityId;
use crate::domain::job::models::JobId;

/// Application unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId(pub Uuid);

impl ApplicationId {
    /// Generate a new random application ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an application ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ApplicationIdError> {
        Uuid::parse_str(s)
            .map(ApplicationId)
            .map_err(|e| ApplicationIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of an application.
///
/// New applications always start as `Pending`. The status only ever moves
/// through the explicit update operation; any source status may move to any
/// target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Boundary string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(ApplicationStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link to the candidate's resume.
///
/// The original upload flow was replaced by an external link, so the only
/// structural requirement is that one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeLink(String);

impl ResumeLink {
    /// Create a validated resume link.
    ///
    /// # Errors
    /// * `Empty` - Link is empty or whitespace
    pub fn new(link: String) -> Result<Self, ResumeLinkError> {
        if link.trim().is_empty() {
            Err(ResumeLinkError::Empty)
        } else {
            Ok(Self(link))
        }
    }

    /// Get link as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Application aggregate entity.
///
/// One candidate's submission to one job; at most one exists per
/// (candidate, job) pair.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: IdentityId,
    pub job_id: JobId,
    pub resume_url: ResumeLink,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
