use super::body::{optional, parse_duration, required, JsonOrForm};
use super::error::{ApiError, ApiResult};
use super::responses::MessageResponse;
use super::session::Session;
use super::state::{GuardedStore, ServerState};
use crate::store::{Comment, CommentStore, Like, LikeStore, LikeToggle, NewSong, Song, SongStore};

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSongBody {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    duration: Option<Value>,
    url: Option<String>,
    cover_image: Option<String>,
}

#[derive(Deserialize)]
struct CreateCommentBody {
    content: Option<String>,
}

async fn list_songs(State(store): State<GuardedStore>) -> Json<Vec<Song>> {
    Json(store.list_songs())
}

async fn get_song(
    State(store): State<GuardedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Song>> {
    store
        .get_song(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Song not found".to_owned()))
}

async fn create_song(
    session: Session,
    State(store): State<GuardedStore>,
    JsonOrForm(body): JsonOrForm<CreateSongBody>,
) -> ApiResult<Json<Song>> {
    let title = required(body.title, "title")?;
    let artist = required(body.artist, "artist")?;
    let duration = parse_duration(body.duration)?;
    let url = required(body.url, "url")?;

    let song = store.create_song(NewSong {
        title,
        artist,
        album: optional(body.album),
        duration,
        url,
        cover_image: optional(body.cover_image),
        user_id: session.user.id,
    });
    debug!("Created song {}", song.id);
    Ok(Json(song))
}

/// Likes the song, or removes the caller's like when one exists.
async fn toggle_like(
    session: Session,
    State(store): State<GuardedStore>,
    Path(song_id): Path<String>,
) -> Response {
    match store.toggle_like(&session.user.id, &song_id) {
        LikeToggle::Added(like) => Json(like).into_response(),
        LikeToggle::Removed(_) => Json(MessageResponse {
            message: "Like removed",
        })
        .into_response(),
    }
}

async fn get_song_likes(
    State(store): State<GuardedStore>,
    Path(song_id): Path<String>,
) -> Json<Vec<Like>> {
    Json(store.find_likes_by_song(&song_id))
}

async fn get_song_comments(
    State(store): State<GuardedStore>,
    Path(song_id): Path<String>,
) -> Json<Vec<Comment>> {
    Json(store.find_comments_by_song(&song_id))
}

async fn create_comment(
    session: Session,
    State(store): State<GuardedStore>,
    Path(song_id): Path<String>,
    JsonOrForm(body): JsonOrForm<CreateCommentBody>,
) -> ApiResult<Json<Comment>> {
    let content = required(body.content, "content")?;
    Ok(Json(store.create_comment(&session.user.id, &song_id, &content)))
}

pub fn make_song_routes() -> Router<ServerState> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/{id}", get(get_song))
        .route("/songs/{id}/like", post(toggle_like))
        .route("/songs/{id}/likes", get(get_song_likes))
        .route(
            "/songs/{id}/comments",
            get(get_song_comments).post(create_comment),
        )
}
