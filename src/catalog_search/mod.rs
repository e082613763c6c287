//! Client side of music discovery: searching the external catalog and
//! keeping a list of favorite tracks.

mod client;
mod favorites;
mod models;

pub use client::{CatalogClient, DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT_SEC, ITUNES_SEARCH_URL};
pub use favorites::{FavoritesList, FAVORITES_STORAGE_KEY};
pub use models::{CatalogTrack, FavoriteTrack, SearchResponse};
