use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::info;

use super::state::*;
use super::{
    admin_routes, community_routes, cors_layer, course_routes, log_requests, ServerConfig,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

#[derive(Serialize)]
struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(stats)
}

async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy",
        message: "CodeMaster API is running",
    })
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router = Router::new()
        .merge(course_routes())
        .merge(community_routes())
        .nest("/admin", admin_routes())
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state.clone());

    home_router
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(cors_layer(&state.config.allowed_origins))
}

pub async fn run_server(
    config: ServerConfig,
    course_store: GuardedCourseStore,
    comment_store: GuardedCommentStore,
    user_store: GuardedUserStore,
) -> Result<()> {
    let port = config.port;
    let state = ServerState::new(config, course_store, comment_store, user_store);
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
