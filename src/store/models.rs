//! Record types held by the store, plus the inputs used to create them and
//! the patches used to update them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common accessors the generic table needs from every record.
pub trait Record: Clone + Send {
    fn id(&self) -> &str;

    /// The timestamp listings are ordered by.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Applies the `Some` fields of a patch over an existing record.
pub trait Patch<R> {
    fn apply_to(self, record: &mut R);
}

pub fn generate_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Length in seconds.
    pub duration: u32,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Song {
    /// Case-insensitive substring match against title, artist and album.
    /// `lowercase_query` must already be lowercased.
    pub fn matches(&self, lowercase_query: &str) -> bool {
        self.title.to_lowercase().contains(lowercase_query)
            || self.artist.to_lowercase().contains(lowercase_query)
            || self
                .album
                .as_ref()
                .is_some_and(|album| album.to_lowercase().contains(lowercase_query))
    }
}

#[derive(Clone, Debug)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: u32,
    pub url: String,
    pub cover_image: Option<String>,
    pub user_id: String,
}

#[derive(Clone, Debug, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<u32>,
    pub url: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewPlaylist {
    pub name: String,
    pub description: Option<String>,
    pub user_id: String,
    pub is_public: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PlaylistPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: String,
    pub playlist_id: String,
    pub song_id: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub user_id: String,
    pub song_id: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of toggling a like on a (user, song) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LikeToggle {
    Added(Like),
    Removed(Like),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub song_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Server side half of a login session. The id is the cookie value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

macro_rules! impl_record {
    ($ty:ty, $timestamp:ident) => {
        impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn timestamp(&self) -> DateTime<Utc> {
                self.$timestamp
            }
        }
    };
}

impl_record!(User, created_at);
impl_record!(Song, created_at);
impl_record!(Playlist, created_at);
impl_record!(PlaylistEntry, added_at);
impl_record!(Like, created_at);
impl_record!(Comment, created_at);
impl_record!(SessionRecord, expires_at);

impl Patch<User> for UserPatch {
    fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
    }
}

impl Patch<Song> for SongPatch {
    fn apply_to(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if self.album.is_some() {
            song.album = self.album;
        }
        if let Some(duration) = self.duration {
            song.duration = duration;
        }
        if let Some(url) = self.url {
            song.url = url;
        }
        if self.cover_image.is_some() {
            song.cover_image = self.cover_image;
        }
    }
}

impl Patch<Playlist> for PlaylistPatch {
    fn apply_to(self, playlist: &mut Playlist) {
        if let Some(name) = self.name {
            playlist.name = name;
        }
        if self.description.is_some() {
            playlist.description = self.description;
        }
        if let Some(is_public) = self.is_public {
            playlist.is_public = is_public;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(album: Option<&str>) -> Song {
        Song {
            id: "s1".to_string(),
            title: "Hotel California".to_string(),
            artist: "Eagles".to_string(),
            album: album.map(str::to_string),
            duration: 391,
            url: "https://example.com/hc.mp3".to_string(),
            cover_image: None,
            user_id: "u1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn song_matches_title_artist_and_album() {
        let with_album = song(Some("Greatest Hits"));
        assert!(with_album.matches("hotel"));
        assert!(with_album.matches("eagl"));
        assert!(with_album.matches("greatest"));
        assert!(!with_album.matches("queen"));

        let without_album = song(None);
        assert!(!without_album.matches("greatest"));
    }

    #[test]
    fn song_patch_overrides_only_given_fields() {
        let mut target = song(Some("Hotel California"));
        SongPatch {
            title: Some("New Kid in Town".to_string()),
            duration: Some(304),
            ..Default::default()
        }
        .apply_to(&mut target);

        assert_eq!(target.title, "New Kid in Town");
        assert_eq!(target.duration, 304);
        assert_eq!(target.artist, "Eagles");
        assert_eq!(target.album.as_deref(), Some("Hotel California"));
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "alice");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn session_expiry() {
        let now = Utc::now();
        let session = SessionRecord {
            id: "token".to_string(),
            user_id: "u1".to_string(),
            expires_at: now,
        };
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + chrono::Duration::seconds(1)));
    }
}
