use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::models::IdentityId;
use crate::job::errors::EmploymentTypeError;
use crate::job::errors::JobIdError;

/// Job unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a job ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, JobIdError> {
        Uuid::parse_str(s)
            .map(JobId)
            .map_err(|e| JobIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Internship,
    #[default]
    Any,
}

impl EmploymentType {
    /// Boundary string for this employment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Internship => "internship",
            EmploymentType::Any => "any",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = EmploymentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(EmploymentType::FullTime),
            "part-time" => Ok(EmploymentType::PartTime),
            "internship" => Ok(EmploymentType::Internship),
            "any" => Ok(EmploymentType::Any),
            other => Err(EmploymentTypeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default experience band when a posting does not state one.
pub const DEFAULT_WORK_EXPERIENCE: &str = "0-1 years";

/// Job posting aggregate entity.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: String,
    pub employer_id: IdentityId,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    pub skills_required: Vec<String>,
    pub apply_link: Option<String>,
    pub employment_type: EmploymentType,
    pub work_experience: String,
    pub posted_at: DateTime<Utc>,
}

/// Command to create a job posting.
///
/// The employer is taken from the acting identity, never from the command.
#[derive(Debug)]
pub struct CreateJobCommand {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: String,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    pub skills_required: Vec<String>,
    pub apply_link: Option<String>,
    pub employment_type: EmploymentType,
    pub work_experience: Option<String>,
}

/// Command to update a posting; omitted fields stay unchanged.
#[derive(Debug)]
pub struct UpdateJobCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    pub skills_required: Option<Vec<String>>,
    pub apply_link: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub work_experience: Option<String>,
}

/// Posting-age window for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostedWithin {
    Day,
    Week,
    Month,
    #[default]
    All,
}

impl PostedWithin {
    /// Parse the boundary strings `24h`, `7d`, `30d`, `all`.
    ///
    /// Anything unrecognized means no window, matching the original API.
    pub fn parse(s: &str) -> Self {
        match s {
            "24h" => PostedWithin::Day,
            "7d" => PostedWithin::Week,
            "30d" => PostedWithin::Month,
            _ => PostedWithin::All,
        }
    }

    /// Lower bound on `posted_at` implied by this window, if any.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PostedWithin::Day => Some(now - chrono::Duration::days(1)),
            PostedWithin::Week => Some(now - chrono::Duration::days(7)),
            PostedWithin::Month => Some(now - chrono::Duration::days(30)),
            PostedWithin::All => None,
        }
    }
}

/// Search filter with pagination.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub employment_type: Option<EmploymentType>,
    pub work_experience: Option<String>,
    pub posted_within: Option<PostedWithin>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl JobFilter {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 5;

    /// Effective page number (1-based).
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(Self::DEFAULT_PAGE)
    }

    /// Effective page size.
    pub fn limit(&self) -> i64 {
        self.limit.filter(|l| *l >= 1).unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// Row offset implied by page and limit.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// One page of search results with pagination totals.
#[derive(Debug, Clone)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total_jobs: i64,
    pub total_pages: i64,
    pub current_page: i64,
}
