use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::application::errors::ApplicationError;
use crate::domain::application::models::Application;
use crate::domain::identity::models::Identity;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobPage;
use crate::domain::ticket::models::Ticket;
use crate::identity::errors::IdentityError;
use crate::job::errors::JobError;
use crate::ticket::errors::TicketError;

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod profile;
pub mod tickets;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::InvalidOrExpiredResetToken => ApiError::BadRequest(err.to_string()),
            IdentityError::InvalidIdentityId(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidRole(_) => ApiError::UnprocessableEntity(err.to_string()),
            IdentityError::Hashing(_)
            | IdentityError::DatabaseError(_)
            | IdentityError::Unknown(_) => {
                tracing::error!("Identity operation failed: {}", err);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::NotFound(_) => ApiError::NotFound(err.to_string()),
            JobError::AccessDenied(_) => ApiError::Forbidden(err.to_string()),
            JobError::InvalidJobId(_) => ApiError::BadRequest(err.to_string()),
            JobError::InvalidEmploymentType(_) => ApiError::UnprocessableEntity(err.to_string()),
            JobError::DatabaseError(_) | JobError::Unknown(_) => {
                tracing::error!("Job operation failed: {}", err);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotFound(_) | ApplicationError::JobNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ApplicationError::AlreadyApplied => ApiError::Conflict(err.to_string()),
            ApplicationError::AccessDenied(_) => ApiError::Forbidden(err.to_string()),
            ApplicationError::InvalidStatus(_)
            | ApplicationError::InvalidResumeLink(_)
            | ApplicationError::InvalidApplicationId(_) => ApiError::BadRequest(err.to_string()),
            ApplicationError::DatabaseError(_) | ApplicationError::Unknown(_) => {
                tracing::error!("Application operation failed: {}", err);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::AccessDenied(_) => ApiError::Forbidden(err.to_string()),
            TicketError::DatabaseError(_) | TicketError::Unknown(_) => {
                tracing::error!("Ticket operation failed: {}", err);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Plain confirmation payload for operations with nothing else to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identity representation at the HTTP boundary. Never carries the secret
/// hash or the reset token fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.as_str().to_string(),
            role: identity.role.as_str().to_string(),
            phone: identity.phone.clone(),
            skills: identity.skills.clone(),
            created_at: identity.created_at,
        }
    }
}

/// Job posting representation at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: String,
    pub employer_id: String,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    pub skills_required: Vec<String>,
    pub apply_link: Option<String>,
    pub employment_type: String,
    pub work_experience: String,
    pub posted_at: DateTime<Utc>,
}

impl From<&Job> for JobData {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            category: job.category.clone(),
            employer_id: job.employer_id.to_string(),
            company_name: job.company_name.clone(),
            salary: job.salary,
            skills_required: job.skills_required.clone(),
            apply_link: job.apply_link.clone(),
            employment_type: job.employment_type.as_str().to_string(),
            work_experience: job.work_experience.clone(),
            posted_at: job.posted_at,
        }
    }
}

/// One search result page with pagination totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPageData {
    pub jobs: Vec<JobData>,
    pub total_jobs: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl From<&JobPage> for JobPageData {
    fn from(page: &JobPage) -> Self {
        Self {
            jobs: page.jobs.iter().map(JobData::from).collect(),
            total_jobs: page.total_jobs,
            total_pages: page.total_pages,
            current_page: page.current_page,
        }
    }
}

/// Application representation at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationData {
    pub id: String,
    pub candidate_id: String,
    pub job_id: String,
    pub resume: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationData {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.to_string(),
            candidate_id: application.candidate_id.to_string(),
            job_id: application.job_id.to_string(),
            resume: application.resume_url.as_str().to_string(),
            status: application.status.as_str().to_string(),
            applied_at: application.applied_at,
            updated_at: application.updated_at,
        }
    }
}

/// Support ticket representation at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub topic: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketData {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            name: ticket.name.clone(),
            email: ticket.email.clone(),
            phone: ticket.phone.clone(),
            topic: ticket.topic.clone(),
            feedback: ticket.feedback.clone(),
            created_at: ticket.created_at,
        }
    }
}
