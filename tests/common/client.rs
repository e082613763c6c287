//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per API endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client logged in as the regular test user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        Self::authenticated_as(base_url, TEST_USER, TEST_PASS).await
    }

    /// Creates a client logged in as the second test user
    pub async fn authenticated_other(base_url: String) -> Self {
        Self::authenticated_as(base_url, OTHER_USER, OTHER_PASS).await
    }

    async fn authenticated_as(base_url: String, username: &str, password: &str) -> Self {
        let client = Self::new(base_url);

        let response = client.login(username, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user authentication failed: {:?}",
            response.text().await
        );

        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /api/auth/register
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response {
        self.post_json(
            "/auth/register",
            json!({ "username": username, "email": email, "password": password }),
        )
        .await
    }

    /// POST /api/auth/login
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_json(
            "/auth/login",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// POST /api/auth/login with a urlencoded form body
    pub async fn login_with_form(&self, username: &str, password: &str) -> Response {
        self.client
            .post(self.url("/auth/login"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("username={}&password={}", username, password))
            .send()
            .await
            .expect("Login request failed")
    }

    /// POST /api/auth/logout
    pub async fn logout(&self) -> Response {
        self.client
            .post(self.url("/auth/logout"))
            .send()
            .await
            .expect("Logout request failed")
    }

    /// GET /api/user/profile
    pub async fn get_profile(&self) -> Response {
        self.get("/user/profile").await
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /api/songs
    pub async fn get_songs(&self) -> Response {
        self.get("/songs").await
    }

    /// GET /api/songs/{id}
    pub async fn get_song(&self, id: &str) -> Response {
        self.get(&format!("/songs/{}", id)).await
    }

    /// POST /api/songs
    pub async fn create_song(&self, body: Value) -> Response {
        self.post_json("/songs", body).await
    }

    /// POST /api/songs/{id}/like
    pub async fn toggle_like(&self, song_id: &str) -> Response {
        self.client
            .post(self.url(&format!("/songs/{}/like", song_id)))
            .send()
            .await
            .expect("Like request failed")
    }

    /// GET /api/songs/{id}/likes
    pub async fn get_likes(&self, song_id: &str) -> Response {
        self.get(&format!("/songs/{}/likes", song_id)).await
    }

    /// GET /api/songs/{id}/comments
    pub async fn get_comments(&self, song_id: &str) -> Response {
        self.get(&format!("/songs/{}/comments", song_id)).await
    }

    /// POST /api/songs/{id}/comments
    pub async fn add_comment(&self, song_id: &str, content: &str) -> Response {
        self.post_json(
            &format!("/songs/{}/comments", song_id),
            json!({ "content": content }),
        )
        .await
    }

    // ========================================================================
    // Playlist Endpoints
    // ========================================================================

    /// GET /api/playlists
    pub async fn get_playlists(&self) -> Response {
        self.get("/playlists").await
    }

    /// GET /api/playlists/{id}
    pub async fn get_playlist(&self, id: &str) -> Response {
        self.get(&format!("/playlists/{}", id)).await
    }

    /// POST /api/playlists
    pub async fn create_playlist(&self, body: Value) -> Response {
        self.post_json("/playlists", body).await
    }

    /// POST /api/playlists/{id}/songs
    pub async fn add_song_to_playlist(&self, playlist_id: &str, song_id: &str) -> Response {
        self.post_json(
            &format!("/playlists/{}/songs", playlist_id),
            json!({ "songId": song_id }),
        )
        .await
    }

    // ========================================================================
    // Search & Health
    // ========================================================================

    /// GET /api/search?q=
    pub async fn search(&self, query: &str) -> Response {
        self.client
            .get(self.url("/search"))
            .query(&[("q", query)])
            .send()
            .await
            .expect("Search request failed")
    }

    /// GET /api/search without a query
    pub async fn search_without_query(&self) -> Response {
        self.get("/search").await
    }

    /// GET /api/health
    pub async fn health(&self) -> Response {
        self.get("/health").await
    }
}
