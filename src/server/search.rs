//! Search over the songs held by the store.

use super::error::{ApiError, ApiResult};
use super::state::{GuardedStore, ServerState};
use crate::store::{Song, SongStore};

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(store): State<GuardedStore>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Song>>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query required".to_owned()))?;

    let results = store.search_songs(&query);
    debug!("Search \"{}\" matched {} songs", query, results.len());
    Ok(Json(results))
}

pub fn make_search_routes() -> Router<ServerState> {
    Router::new().route("/search", get(search))
}
