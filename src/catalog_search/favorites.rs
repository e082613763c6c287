//! Favorite tracks kept as a JSON blob on disk.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::models::{CatalogTrack, FavoriteTrack};

pub const FAVORITES_STORAGE_KEY: &str = "musicFavorites";

/// Ordered list of favorites, oldest first. Every mutation is written back
/// to the backing file.
pub struct FavoritesList {
    path: PathBuf,
    favorites: Vec<FavoriteTrack>,
}

impl FavoritesList {
    pub fn storage_path(dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", FAVORITES_STORAGE_KEY))
    }

    /// Loads the favorites kept in `dir`. A missing or unreadable blob
    /// yields an empty list.
    pub fn load(dir: &Path) -> Self {
        let path = Self::storage_path(dir);
        let favorites = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!("Discarding unreadable favorites at {:?}: {}", path, err);
                Vec::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!("Could not read favorites at {:?}: {}", path, err);
                Vec::new()
            }
        };
        Self { path, favorites }
    }

    pub fn favorites(&self) -> &[FavoriteTrack] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn contains(&self, track_id: u64) -> bool {
        self.favorites.iter().any(|f| f.track.track_id == track_id)
    }

    /// Returns false, leaving the list untouched, if the track is already a
    /// favorite.
    pub fn add(&mut self, track: CatalogTrack) -> Result<bool> {
        if self.contains(track.track_id) {
            return Ok(false);
        }
        self.favorites.push(FavoriteTrack {
            track,
            added_at: Utc::now(),
        });
        self.save()?;
        Ok(true)
    }

    /// Returns whether a favorite was removed.
    pub fn remove(&mut self, track_id: u64) -> Result<bool> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.track.track_id != track_id);
        if self.favorites.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Empties the list and deletes the backing file.
    pub fn clear(&mut self) -> Result<()> {
        self.favorites.clear();
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err)
                .with_context(|| format!("Failed to delete favorites at {:?}", self.path)),
            _ => Ok(()),
        }
    }

    fn save(&self) -> Result<()> {
        let content =
            serde_json::to_string(&self.favorites).context("Failed to serialize favorites")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write favorites at {:?}", self.path))
    }
}
