use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PLACEHOLDER_ARTWORK_URL: &str = "https://via.placeholder.com";

/// A song as returned by the external catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTrack {
    pub track_id: u64,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default, rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_time_millis: Option<u64>,
    #[serde(default)]
    pub primary_genre_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub track_price: Option<f64>,
}

impl CatalogTrack {
    /// Whether the catalog offers a preview clip for this track.
    pub fn is_playable(&self) -> bool {
        self.preview_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }

    /// Artwork resized to `size`x`size`, or a placeholder image when the
    /// track has none.
    pub fn artwork_or_placeholder(&self, size: u32) -> String {
        let dimensions = format!("{}x{}", size, size);
        match self.artwork_url_100.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.replace("100x100", &dimensions),
            None => format!(
                "{}/{}/374151/9CA3AF?text=No+Image",
                PLACEHOLDER_ARTWORK_URL, dimensions
            ),
        }
    }

    /// Track length as `m:ss`.
    pub fn formatted_duration(&self) -> Option<String> {
        let total_seconds = self.track_time_millis? / 1000;
        Some(format!("{}:{:02}", total_seconds / 60, total_seconds % 60))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: usize,
    pub results: Vec<CatalogTrack>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteTrack {
    #[serde(flatten)]
    pub track: CatalogTrack,
    pub added_at: DateTime<Utc>,
}
