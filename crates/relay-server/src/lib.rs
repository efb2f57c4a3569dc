pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    // The Studio plugin and browser clients call from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Conversation
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/generate", post(routes::generate::generate))
        // Studio plugin
        .route(
            "/api/sync-structure",
            post(routes::structure::sync_structure),
        )
        // Session reads
        .route(
            "/api/sessions/{id}/messages",
            get(routes::sessions::list_messages),
        )
        .route(
            "/api/sessions/{id}/structure",
            get(routes::sessions::get_structure),
        )
        .route(
            "/api/sessions/{id}/pending-actions",
            get(routes::sessions::list_pending_actions),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Bind `0.0.0.0:{port}` and serve until the task is dropped.
pub async fn serve(app_state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener).await
}

/// Serve on a pre-bound listener.
///
/// Lets the caller read the actual port first, which matters when binding to
/// port 0.
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("studio relay listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
