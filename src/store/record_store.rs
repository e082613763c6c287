use super::models::{
    Comment, Like, LikeToggle, NewPlaylist, NewSong, NewUser, Playlist, PlaylistEntry,
    PlaylistPatch, SessionRecord, Song, SongPatch, User, UserPatch,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized")]
    Forbidden,
}

pub trait UserStore: Send + Sync {
    /// Creates a new user.
    /// Returns Err if the username or the email are already in use.
    fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Returns None if the user does not exist.
    fn get_user(&self, user_id: &str) -> Option<User>;

    fn find_user_by_username(&self, username: &str) -> Option<User>;

    fn find_user_by_email(&self, email: &str) -> Option<User>;

    fn list_users(&self) -> Vec<User>;

    /// Merges the patch over the stored user.
    /// Fails with NotFound, or with a uniqueness error when the patch would
    /// collide with another user.
    fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<User, StoreError>;

    /// Returns whether a user was removed.
    fn delete_user(&self, user_id: &str) -> bool;
}

pub trait SongStore: Send + Sync {
    fn create_song(&self, song: NewSong) -> Song;

    fn get_song(&self, song_id: &str) -> Option<Song>;

    fn find_songs_by_user(&self, user_id: &str) -> Vec<Song>;

    /// All songs, newest first.
    fn list_songs(&self) -> Vec<Song>;

    /// Case-insensitive substring search over title, artist and album.
    fn search_songs(&self, query: &str) -> Vec<Song>;

    fn update_song(&self, song_id: &str, patch: SongPatch) -> Option<Song>;

    fn delete_song(&self, song_id: &str) -> bool;
}

pub trait PlaylistStore: Send + Sync {
    fn create_playlist(&self, playlist: NewPlaylist) -> Playlist;

    fn get_playlist(&self, playlist_id: &str) -> Option<Playlist>;

    fn find_playlists_by_user(&self, user_id: &str) -> Vec<Playlist>;

    /// All playlists, newest first.
    fn list_playlists(&self) -> Vec<Playlist>;

    fn update_playlist(&self, playlist_id: &str, patch: PlaylistPatch) -> Option<Playlist>;

    fn delete_playlist(&self, playlist_id: &str) -> bool;

    /// Appends a song to a playlist owned by `caller_id`.
    /// The ownership check and the insertion happen atomically.
    /// The song itself is not required to exist.
    fn add_song_to_playlist(
        &self,
        playlist_id: &str,
        song_id: &str,
        caller_id: &str,
    ) -> Result<PlaylistEntry, StoreError>;

    /// Entries of a playlist, in the order they were added.
    fn find_entries_by_playlist(&self, playlist_id: &str) -> Vec<PlaylistEntry>;

    fn delete_playlist_entry(&self, entry_id: &str) -> bool;
}

pub trait LikeStore: Send + Sync {
    fn create_like(&self, user_id: &str, song_id: &str) -> Like;

    fn find_like(&self, user_id: &str, song_id: &str) -> Option<Like>;

    fn find_likes_by_song(&self, song_id: &str) -> Vec<Like>;

    fn find_likes_by_user(&self, user_id: &str) -> Vec<Like>;

    fn delete_like(&self, like_id: &str) -> bool;

    /// Removes the like of `user_id` on `song_id` if present, creates it
    /// otherwise. Never leaves more than one like per pair.
    fn toggle_like(&self, user_id: &str, song_id: &str) -> LikeToggle;
}

pub trait CommentStore: Send + Sync {
    fn create_comment(&self, user_id: &str, song_id: &str, content: &str) -> Comment;

    /// Comments on a song, newest first.
    fn find_comments_by_song(&self, song_id: &str) -> Vec<Comment>;

    fn delete_comment(&self, comment_id: &str) -> bool;
}

pub trait SessionStore: Send + Sync {
    fn add_session(&self, session: SessionRecord);

    /// Returns the session if it exists and is not expired at `now`.
    /// An expired session is deleted on the way out.
    fn get_session(&self, session_id: &str, now: DateTime<Utc>) -> Option<SessionRecord>;

    /// Returns whether a session was removed.
    fn delete_session(&self, session_id: &str) -> bool;

    /// Deletes every session expired at `now`, returning how many went.
    fn prune_expired_sessions(&self, now: DateTime<Utc>) -> usize;
}

pub trait FullStore:
    UserStore + SongStore + PlaylistStore + LikeStore + CommentStore + SessionStore
{
}

impl<T> FullStore for T where
    T: UserStore + SongStore + PlaylistStore + LikeStore + CommentStore + SessionStore
{
}
