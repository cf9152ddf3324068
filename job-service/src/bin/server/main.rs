use std::sync::Arc;

use auth::Authenticator;
use job_service::application::ports::ApplicationServicePort;
use job_service::config::Config;
use job_service::domain::application::service::ApplicationService;
use job_service::domain::identity::service::IdentityService;
use job_service::domain::job::service::JobService;
use job_service::domain::ticket::service::TicketService;
use job_service::identity::ports::IdentityServicePort;
use job_service::inbound::http::router::create_router;
use job_service::job::ports::JobServicePort;
use job_service::outbound::mailer::HttpMailSender;
use job_service::outbound::repositories::PostgresApplicationRepository;
use job_service::outbound::repositories::PostgresIdentityRepository;
use job_service::outbound::repositories::PostgresJobRepository;
use job_service::outbound::repositories::PostgresTicketRepository;
use job_service::ticket::ports::TicketServicePort;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "job-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        mail_relay = %config.mail.relay_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_days,
    ));

    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let job_repository = Arc::new(PostgresJobRepository::new(pg_pool.clone()));
    let application_repository = Arc::new(PostgresApplicationRepository::new(pg_pool.clone()));
    let ticket_repository = Arc::new(PostgresTicketRepository::new(pg_pool));
    let mail_sender = Arc::new(HttpMailSender::new(&config)?);

    let identity_service: Arc<dyn IdentityServicePort> = Arc::new(IdentityService::new(
        identity_repository,
        mail_sender,
        Arc::clone(&authenticator),
        config.mail.frontend_url.clone(),
    ));
    let job_service: Arc<dyn JobServicePort> =
        Arc::new(JobService::new(Arc::clone(&job_repository)));
    let application_service: Arc<dyn ApplicationServicePort> = Arc::new(ApplicationService::new(
        application_repository,
        job_repository,
    ));
    let ticket_service: Arc<dyn TicketServicePort> =
        Arc::new(TicketService::new(ticket_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        identity_service,
        job_service,
        application_service,
        ticket_service,
        authenticator,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
