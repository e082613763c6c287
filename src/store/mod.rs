mod in_memory_store;
pub mod models;
mod record_store;
pub mod seed;
mod table;

pub use in_memory_store::InMemoryStore;
pub use models::{
    Comment, Like, LikeToggle, NewPlaylist, NewSong, NewUser, Playlist, PlaylistEntry,
    PlaylistPatch, SessionRecord, Song, SongPatch, User, UserPatch,
};
pub use record_store::{
    CommentStore, FullStore, LikeStore, PlaylistStore, SessionStore, SongStore, StoreError,
    UserStore,
};
pub use seed::seed_sample_data;
