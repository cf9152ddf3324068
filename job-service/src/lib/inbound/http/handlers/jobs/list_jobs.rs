use std::str::FromStr;

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::job::models::EmploymentType;
use crate::domain::job::models::JobFilter;
use crate::domain::job::models::PostedWithin;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JobPageData;
use crate::inbound::http::router::AppState;

/// Query parameters for the public job search.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub employment_type: Option<String>,
    pub work_experience: Option<String>,
    pub posted_within: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListJobsQuery {
    fn try_into_filter(self) -> Result<JobFilter, ApiError> {
        let employment_type = self
            .employment_type
            .as_deref()
            .map(EmploymentType::from_str)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(JobFilter {
            search: self.search,
            category: self.category,
            location: self.location,
            salary: self.salary,
            employment_type,
            work_experience: self.work_experience,
            posted_within: self.posted_within.as_deref().map(PostedWithin::parse),
            page: self.page,
            limit: self.limit,
        })
    }
}

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<ApiSuccess<JobPageData>, ApiError> {
    let filter = query.try_into_filter()?;

    state
        .job_service
        .search_jobs(filter)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}
