//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own in-memory store.

use super::constants::*;
use super::fixtures::{populate_store, Fixtures};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tunescout_server::server::{cookie_key_from_secret, state::ServerState};
use tunescout_server::{make_app, FullStore, InMemoryStore, RequestsLoggingLevel, ServerConfig};
use tunescout_server::UserManager;

/// Test server instance with an isolated store
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Store for direct access in tests
    pub store: Arc<dyn FullStore>,

    pub user_manager: Arc<UserManager>,

    /// Ids of the fixture records
    pub fixtures: Fixtures,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the fixtures cannot be created, the port cannot be bound or
    /// the server doesn't become ready within the timeout.
    pub async fn spawn() -> Self {
        Self::spawn_with_session_ttl(chrono::Duration::hours(1)).await
    }

    /// Spawns a server whose sessions live for `session_ttl`.
    pub async fn spawn_with_session_ttl(session_ttl: chrono::Duration) -> Self {
        let store: Arc<dyn FullStore> = Arc::new(InMemoryStore::new());
        let user_manager = Arc::new(UserManager::new(store.clone(), session_ttl));
        let fixtures =
            populate_store(store.as_ref(), &user_manager).expect("Failed to create fixtures");

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            bind_address: "127.0.0.1".to_string(),
            port,
            frontend_dir_path: None,
            secure_cookies: false,
            session_ttl,
        };
        let state = ServerState::new(
            config,
            store.clone(),
            user_manager.clone(),
            cookie_key_from_secret("end-to-end test secret"),
        );
        let app = make_app(state);

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            store,
            user_manager,
            fixtures,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/api/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
