//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are owned by the
//! feature crates.

mod config;

use std::net::SocketAddr;

use auth::domain::UserRepository;
use auth::presentation::handlers::AuthAppState;
use auth::{AuthConfig, InMemoryUserRepository, PgUserRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use scholarship::domain::repository::{DocumentStore, PaymentGateway};
use scholarship::{
    InMemoryDocumentStore, PgDocumentStore, ScholarshipAppState, ScholarshipConfig, StripeGateway,
    member_router, moderator_router, public_router,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,scholarship=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Configuration loaded");

    let gateway = StripeGateway::new(config.stripe.clone());

    // Database connection
    let (app, pool) = match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let app = build_router(
                PgUserRepository::new(pool.clone()),
                PgDocumentStore::new(pool.clone()),
                gateway,
                config.auth.clone(),
            );
            (app, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            let app = build_router(
                InMemoryUserRepository::new(),
                InMemoryDocumentStore::new(),
                gateway,
                config.auth.clone(),
            );
            (app, None)
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    Ok(())
}

/// Session, user, catalogue, member and moderator routes over one set of stores
fn build_router<U, D, G>(users: U, store: D, gateway: G, auth_config: AuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    D: DocumentStore,
    G: PaymentGateway + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(users, auth_config);
    let guard = auth_state.guard();
    let state = ScholarshipAppState::new(store, gateway, ScholarshipConfig::default());

    Router::new()
        .merge(auth_router(auth_state.clone()))
        .merge(public_router(state.clone()))
        .merge(member_router(state.clone(), &guard))
        .merge(moderator_router(state, &guard, auth_state.user_repo.clone()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
