use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_redis_store::{fred::prelude::*, RedisStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::config::{SessionConfig, SESSION_TTL_DAYS};
use api::gql::build_schema;
use api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Configure connection pool with appropriate limits
    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(3))
        .idle_timeout(Some(std::time::Duration::from_secs(600)))
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;
    tracing::info!(
        "Connected to Postgres with max {} connections",
        max_connections
    );

    // Run database migrations automatically on startup (can be disabled with SKIP_MIGRATIONS=true)
    let skip_migrations = std::env::var("SKIP_MIGRATIONS")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    if skip_migrations {
        tracing::info!("Skipping database migrations (SKIP_MIGRATIONS=true)");
    } else {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::info!("Database migrations completed successfully");
    }

    // Sessions live in Redis, keyed by the cookie value.
    let session_config = SessionConfig::from_env()?;
    let redis_pool = Pool::new(
        Config::from_url(&session_config.redis_url)?,
        None,
        None,
        None,
        6,
    )?;
    let _redis_conn = redis_pool.connect();
    redis_pool.wait_for_connect().await?;
    tracing::info!("Connected to Redis session store");

    let session_store = RedisStore::new(redis_pool);
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(session_config.cookie_name.clone())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(session_config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_TTL_DAYS)));

    let state = AppState::new(pool);

    // Build GraphQL schema from the gql module
    let schema = build_schema(state.clone());

    let app = build_router(state, schema, session_layer);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "4000".into())
        .parse()?;
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
