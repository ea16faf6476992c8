use std::time::Duration;

use async_graphql::{EmptySubscription, ObjectType, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::{Session, SessionManagerLayer, SessionStore};

use crate::error::AppError;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL.
/// Generic over the schema roots and the session store so tests can swap in
/// an in-memory store.
pub fn build_router<Q, M, Store>(
    state: AppState,
    schema: Schema<Q, M, EmptySubscription>,
    session_layer: SessionManagerLayer<Store>,
) -> Router
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    Store: SessionStore + Clone,
{
    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        .route(
            "/graphql",
            post({
                let schema_clone = schema.clone();
                move |state, session, req| graphql_handler(state, session, req, schema_clone)
            }),
        )
        .with_state(state)
        // Resolves or creates the server-side session before the handler
        // runs, and writes the Set-Cookie header on the way out.
        .layer(session_layer)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                // The session cookie travels cross-origin.
                .allow_credentials(true)
        })
}

/// GraphQL handler that injects the per-request context: the app state and
/// the request's session handle.
async fn graphql_handler<Q, M>(
    State(state): State<AppState>,
    session: Session,
    req: GraphQLRequest,
    schema: Schema<Q, M, EmptySubscription>,
) -> GraphQLResponse
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
{
    let gql_request = req.into_inner().data(state).data(session);
    schema.execute(gql_request).await.into()
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await?;
    Ok("ok")
}
