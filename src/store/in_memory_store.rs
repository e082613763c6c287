//! Process-local implementation of the record store.
//!
//! Every entity type lives in its own mutex-guarded table. Operations that
//! need to check something before writing (uniqueness, like toggling,
//! playlist ownership) do both under the same lock. When two tables are held
//! at once, playlists are always locked before playlist entries.

use super::models::{
    generate_record_id, Comment, Like, LikeToggle, NewPlaylist, NewSong, NewUser, Playlist,
    PlaylistEntry, PlaylistPatch, SessionRecord, Song, SongPatch, User, UserPatch,
};
use super::record_store::{
    CommentStore, LikeStore, PlaylistStore, SessionStore, SongStore, StoreError, UserStore,
};
use super::table::{Order, Table};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Table<User>>,
    songs: Mutex<Table<Song>>,
    playlists: Mutex<Table<Playlist>>,
    playlist_entries: Mutex<Table<PlaylistEntry>>,
    likes: Mutex<Table<Like>>,
    comments: Mutex<Table<Comment>>,
    sessions: Mutex<Table<SessionRecord>>,
}

/// Every mutation is a single map operation, so a poisoned table is still
/// consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryStore {
    fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = lock(&self.users);
        if users.find(|u| u.username == user.username).is_some() {
            return Err(StoreError::UsernameTaken);
        }
        if users.find(|u| u.email == user.email).is_some() {
            return Err(StoreError::EmailTaken);
        }
        let created = users.insert(User {
            id: generate_record_id(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        });
        debug!("Created user {} ({})", created.username, created.id);
        Ok(created)
    }

    fn get_user(&self, user_id: &str) -> Option<User> {
        lock(&self.users).get(user_id).cloned()
    }

    fn find_user_by_username(&self, username: &str) -> Option<User> {
        lock(&self.users).find(|u| u.username == username).cloned()
    }

    fn find_user_by_email(&self, email: &str) -> Option<User> {
        lock(&self.users).find(|u| u.email == email).cloned()
    }

    fn list_users(&self) -> Vec<User> {
        lock(&self.users).list(Order::OldestFirst)
    }

    fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<User, StoreError> {
        let mut users = lock(&self.users);
        if users.get(user_id).is_none() {
            return Err(StoreError::NotFound("User"));
        }
        if let Some(username) = &patch.username {
            if users
                .find(|u| u.id != user_id && &u.username == username)
                .is_some()
            {
                return Err(StoreError::UsernameTaken);
            }
        }
        if let Some(email) = &patch.email {
            if users.find(|u| u.id != user_id && &u.email == email).is_some() {
                return Err(StoreError::EmailTaken);
            }
        }
        users
            .update(user_id, patch)
            .ok_or(StoreError::NotFound("User"))
    }

    fn delete_user(&self, user_id: &str) -> bool {
        lock(&self.users).remove(user_id).is_some()
    }
}

impl SongStore for InMemoryStore {
    fn create_song(&self, song: NewSong) -> Song {
        lock(&self.songs).insert(Song {
            id: generate_record_id(),
            title: song.title,
            artist: song.artist,
            album: song.album,
            duration: song.duration,
            url: song.url,
            cover_image: song.cover_image,
            user_id: song.user_id,
            created_at: Utc::now(),
        })
    }

    fn get_song(&self, song_id: &str) -> Option<Song> {
        lock(&self.songs).get(song_id).cloned()
    }

    fn find_songs_by_user(&self, user_id: &str) -> Vec<Song> {
        lock(&self.songs).filter(|s| s.user_id == user_id, Order::NewestFirst)
    }

    fn list_songs(&self) -> Vec<Song> {
        lock(&self.songs).list(Order::NewestFirst)
    }

    fn search_songs(&self, query: &str) -> Vec<Song> {
        let lowercase_query = query.to_lowercase();
        lock(&self.songs).filter(|s| s.matches(&lowercase_query), Order::NewestFirst)
    }

    fn update_song(&self, song_id: &str, patch: SongPatch) -> Option<Song> {
        lock(&self.songs).update(song_id, patch)
    }

    fn delete_song(&self, song_id: &str) -> bool {
        lock(&self.songs).remove(song_id).is_some()
    }
}

impl PlaylistStore for InMemoryStore {
    fn create_playlist(&self, playlist: NewPlaylist) -> Playlist {
        lock(&self.playlists).insert(Playlist {
            id: generate_record_id(),
            name: playlist.name,
            description: playlist.description,
            user_id: playlist.user_id,
            is_public: playlist.is_public,
            created_at: Utc::now(),
        })
    }

    fn get_playlist(&self, playlist_id: &str) -> Option<Playlist> {
        lock(&self.playlists).get(playlist_id).cloned()
    }

    fn find_playlists_by_user(&self, user_id: &str) -> Vec<Playlist> {
        lock(&self.playlists).filter(|p| p.user_id == user_id, Order::NewestFirst)
    }

    fn list_playlists(&self) -> Vec<Playlist> {
        lock(&self.playlists).list(Order::NewestFirst)
    }

    fn update_playlist(&self, playlist_id: &str, patch: PlaylistPatch) -> Option<Playlist> {
        lock(&self.playlists).update(playlist_id, patch)
    }

    fn delete_playlist(&self, playlist_id: &str) -> bool {
        lock(&self.playlists).remove(playlist_id).is_some()
    }

    fn add_song_to_playlist(
        &self,
        playlist_id: &str,
        song_id: &str,
        caller_id: &str,
    ) -> Result<PlaylistEntry, StoreError> {
        let playlists = lock(&self.playlists);
        let playlist = playlists
            .get(playlist_id)
            .ok_or(StoreError::NotFound("Playlist"))?;
        if playlist.user_id != caller_id {
            return Err(StoreError::Forbidden);
        }

        let entry = lock(&self.playlist_entries).insert(PlaylistEntry {
            id: generate_record_id(),
            playlist_id: playlist_id.to_owned(),
            song_id: song_id.to_owned(),
            added_at: Utc::now(),
        });
        Ok(entry)
    }

    fn find_entries_by_playlist(&self, playlist_id: &str) -> Vec<PlaylistEntry> {
        lock(&self.playlist_entries).filter(|e| e.playlist_id == playlist_id, Order::OldestFirst)
    }

    fn delete_playlist_entry(&self, entry_id: &str) -> bool {
        lock(&self.playlist_entries).remove(entry_id).is_some()
    }
}

fn new_like(user_id: &str, song_id: &str) -> Like {
    Like {
        id: generate_record_id(),
        user_id: user_id.to_owned(),
        song_id: song_id.to_owned(),
        created_at: Utc::now(),
    }
}

impl LikeStore for InMemoryStore {
    fn create_like(&self, user_id: &str, song_id: &str) -> Like {
        lock(&self.likes).insert(new_like(user_id, song_id))
    }

    fn find_like(&self, user_id: &str, song_id: &str) -> Option<Like> {
        lock(&self.likes)
            .find(|l| l.user_id == user_id && l.song_id == song_id)
            .cloned()
    }

    fn find_likes_by_song(&self, song_id: &str) -> Vec<Like> {
        lock(&self.likes).filter(|l| l.song_id == song_id, Order::OldestFirst)
    }

    fn find_likes_by_user(&self, user_id: &str) -> Vec<Like> {
        lock(&self.likes).filter(|l| l.user_id == user_id, Order::OldestFirst)
    }

    fn delete_like(&self, like_id: &str) -> bool {
        lock(&self.likes).remove(like_id).is_some()
    }

    fn toggle_like(&self, user_id: &str, song_id: &str) -> LikeToggle {
        let mut likes = lock(&self.likes);
        let existing_id = likes
            .find(|l| l.user_id == user_id && l.song_id == song_id)
            .map(|l| l.id.clone());

        match existing_id.and_then(|id| likes.remove(&id)) {
            Some(removed) => LikeToggle::Removed(removed),
            None => LikeToggle::Added(likes.insert(new_like(user_id, song_id))),
        }
    }
}

impl CommentStore for InMemoryStore {
    fn create_comment(&self, user_id: &str, song_id: &str, content: &str) -> Comment {
        lock(&self.comments).insert(Comment {
            id: generate_record_id(),
            user_id: user_id.to_owned(),
            song_id: song_id.to_owned(),
            content: content.to_owned(),
            created_at: Utc::now(),
        })
    }

    fn find_comments_by_song(&self, song_id: &str) -> Vec<Comment> {
        lock(&self.comments).filter(|c| c.song_id == song_id, Order::NewestFirst)
    }

    fn delete_comment(&self, comment_id: &str) -> bool {
        lock(&self.comments).remove(comment_id).is_some()
    }
}

impl SessionStore for InMemoryStore {
    fn add_session(&self, session: SessionRecord) {
        lock(&self.sessions).insert(session);
    }

    fn get_session(&self, session_id: &str, now: DateTime<Utc>) -> Option<SessionRecord> {
        let mut sessions = lock(&self.sessions);
        let expired = sessions.get(session_id)?.is_expired_at(now);
        if expired {
            debug!("Dropping expired session on lookup");
            sessions.remove(session_id);
            return None;
        }
        sessions.get(session_id).cloned()
    }

    fn delete_session(&self, session_id: &str) -> bool {
        lock(&self.sessions).remove(session_id).is_some()
    }

    fn prune_expired_sessions(&self, now: DateTime<Utc>) -> usize {
        lock(&self.sessions).remove_where(|s| s.is_expired_at(now))
    }
}
