use anyhow::{Context, Result};
use std::any::Any;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::Key;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::{error, info};

use super::auth_routes::make_auth_routes;
use super::error::INTERNAL_ERROR_MESSAGE;
use super::playlist_routes::make_playlist_routes;
use super::search::make_search_routes;
use super::song_routes::make_song_routes;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    uptime: String,
}

#[derive(Serialize)]
struct PanicResponse {
    error: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    error!("Request handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(PanicResponse {
            error: INTERNAL_ERROR_MESSAGE,
        }),
    )
        .into_response()
}

fn make_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router<ServerState> = Router::new()
        .merge(make_auth_routes())
        .merge(make_song_routes())
        .merge(make_playlist_routes())
        .merge(make_search_routes())
        .route("/health", get(health));

    let mut app: Router = Router::new()
        .nest("/api", api_routes)
        .with_state(state.clone());

    if let Some(frontend_path) = &state.config.frontend_dir_path {
        let index_file = PathBuf::from(frontend_path).join("index.html");
        let static_files_service =
            ServeDir::new(frontend_path).fallback(ServeFile::new(index_file));
        app = app.fallback_service(static_files_service);
    }

    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(make_cors_layer())
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    store: GuardedStore,
    user_manager: GuardedUserManager,
    config: ServerConfig,
    cookie_key: Key,
) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let state = ServerState::new(config, store, user_manager, cookie_key);
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Ready to serve at {}", address);

    Ok(axum::serve(listener, app).await?)
}
