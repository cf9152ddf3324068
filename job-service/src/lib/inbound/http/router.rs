use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::applications::apply::apply;
use super::handlers::applications::job_applications::job_applications;
use super::handlers::applications::list_applications::list_applications;
use super::handlers::applications::my_applications::my_applications;
use super::handlers::applications::update_status::update_status;
use super::handlers::auth::forgot_password::forgot_password;
use super::handlers::auth::login::login;
use super::handlers::auth::reset_password::reset_password;
use super::handlers::auth::signup::signup;
use super::handlers::jobs::delete_job::delete_job;
use super::handlers::jobs::list_jobs::list_jobs;
use super::handlers::jobs::my_jobs::my_jobs;
use super::handlers::jobs::post_job::post_job;
use super::handlers::jobs::update_job::update_job;
use super::handlers::profile::change_password::change_password;
use super::handlers::profile::get_profile::get_profile;
use super::handlers::profile::update_profile::update_profile;
use super::handlers::tickets::create_ticket::create_ticket;
use super::handlers::tickets::list_tickets::list_tickets;
use super::middleware::authenticate as auth_middleware;
use crate::application::ports::ApplicationServicePort;
use crate::identity::ports::IdentityServicePort;
use crate::job::ports::JobServicePort;
use crate::ticket::ports::TicketServicePort;

/// Shared state handed to every handler.
///
/// Services are held behind their ports, so the router works the same over
/// production adapters and test fakes.
#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub job_service: Arc<dyn JobServicePort>,
    pub application_service: Arc<dyn ApplicationServicePort>,
    pub ticket_service: Arc<dyn TicketServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    job_service: Arc<dyn JobServicePort>,
    application_service: Arc<dyn ApplicationServicePort>,
    ticket_service: Arc<dyn TicketServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        identity_service,
        job_service,
        application_service,
        ticket_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password/:token", post(reset_password))
        .route("/api/jobs", get(list_jobs));

    let protected_routes = Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/profile", put(update_profile))
        .route("/api/profile/password", put(change_password))
        .route("/api/jobs", post(post_job))
        .route("/api/jobs/mine", get(my_jobs))
        .route("/api/jobs/:job_id", put(update_job))
        .route("/api/jobs/:job_id", delete(delete_job))
        .route("/api/applications/jobs/:job_id", post(apply))
        .route("/api/applications/jobs/:job_id", get(job_applications))
        .route("/api/applications/mine", get(my_applications))
        .route("/api/applications", get(list_applications))
        .route(
            "/api/applications/:application_id/status",
            patch(update_status),
        )
        .route("/api/tickets", post(create_ticket))
        .route("/api/tickets", get(list_tickets))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
