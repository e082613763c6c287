use super::body::{is_public_flag, optional, required, JsonOrForm};
use super::error::{ApiError, ApiResult};
use super::responses::PlaylistWithSongs;
use super::session::Session;
use super::state::{GuardedStore, ServerState};
use crate::store::{NewPlaylist, Playlist, PlaylistEntry, PlaylistStore, SongStore};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlaylistBody {
    name: Option<String>,
    description: Option<String>,
    is_public: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddSongBody {
    song_id: Option<String>,
}

async fn list_playlists(State(store): State<GuardedStore>) -> Json<Vec<Playlist>> {
    Json(store.list_playlists())
}

/// Returns the playlist with its songs in entry order. Entries pointing to
/// songs that no longer exist are skipped.
async fn get_playlist(
    State(store): State<GuardedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlaylistWithSongs>> {
    let playlist = store
        .get_playlist(&id)
        .ok_or_else(|| ApiError::NotFound("Playlist not found".to_owned()))?;

    let songs = store
        .find_entries_by_playlist(&id)
        .iter()
        .filter_map(|entry| store.get_song(&entry.song_id))
        .collect();

    Ok(Json(PlaylistWithSongs { playlist, songs }))
}

async fn create_playlist(
    session: Session,
    State(store): State<GuardedStore>,
    JsonOrForm(body): JsonOrForm<CreatePlaylistBody>,
) -> ApiResult<Json<Playlist>> {
    let name = required(body.name, "name")?;
    let playlist = store.create_playlist(NewPlaylist {
        name,
        description: optional(body.description),
        user_id: session.user.id,
        is_public: is_public_flag(body.is_public.as_ref()),
    });
    debug!("Created playlist {}", playlist.id);
    Ok(Json(playlist))
}

async fn add_song_to_playlist(
    session: Session,
    State(store): State<GuardedStore>,
    Path(playlist_id): Path<String>,
    JsonOrForm(body): JsonOrForm<AddSongBody>,
) -> ApiResult<Json<PlaylistEntry>> {
    let song_id = required(body.song_id, "songId")?;
    let entry = store.add_song_to_playlist(&playlist_id, &song_id, &session.user.id)?;
    Ok(Json(entry))
}

pub fn make_playlist_routes() -> Router<ServerState> {
    Router::new()
        .route("/playlists", get(list_playlists).post(create_playlist))
        .route("/playlists/{id}", get(get_playlist))
        .route("/playlists/{id}/songs", post(add_song_to_playlist))
}
