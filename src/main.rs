//! KODESK - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, Router};
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kodesk::{
    config::{LogFormat, CONFIG},
    constants::MAX_REQUEST_BODY_BYTES,
    db::{
        self,
        repositories::{ProgressRepository, SubmissionRepository, TaskRepository},
    },
    execution::{DockerHost, Executor},
    handlers,
    middleware::logging_middleware,
    services::{EvaluationService, ProgressService},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let json = matches!(CONFIG.server.log_format, LogFormat::Json);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting KODESK server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Redis only backs rate limiting
    let redis = match &CONFIG.redis.url {
        Some(url) => {
            tracing::info!("Connecting to Redis...");
            let client = RedisClient::open(url.as_str())?;
            Some(redis::aio::ConnectionManager::new(client).await?)
        }
        None => {
            tracing::warn!("REDIS_URL not set, execution rate limiting disabled");
            None
        }
    };

    // Initialize Docker client
    tracing::info!("Connecting to Docker...");
    let host = DockerHost::connect(&CONFIG.docker.socket_path, CONFIG.docker.api_timeout_secs)?;
    let docker_version = host.version().await?;
    tracing::info!("Connected to Docker version: {}", docker_version);

    let executor = Arc::new(Executor::new(Arc::new(host), &CONFIG.sandbox));
    for image in executor.missing_images().await {
        tracing::warn!(image, "Sandbox image missing, runs in this language will fail until it is pulled");
    }

    // Create application state
    let submissions = Arc::new(SubmissionRepository::new(db_pool.clone()));
    let progress = ProgressService::new(Arc::new(ProgressRepository::new(db_pool.clone())));
    let evaluator = EvaluationService::new(
        Arc::clone(&executor),
        Arc::new(TaskRepository::new(db_pool)),
        submissions.clone(),
        progress.clone(),
        CONFIG.sandbox.max_parallel_tests,
    );
    let state = AppState::new(
        CONFIG.clone(),
        executor,
        evaluator,
        progress,
        submissions,
        redis,
    );

    // Build the router
    let app = Router::new()
        .nest("/api", handlers::routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
