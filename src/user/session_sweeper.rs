use super::UserManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Periodically removes expired sessions from the store.
pub fn spawn_session_sweeper(user_manager: Arc<UserManager>, interval: Duration) -> JoinHandle<()> {
    info!(
        "Session sweeping enabled: every {} minutes",
        interval.as_secs() / 60
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let count = user_manager.sweep_expired_sessions();
            if count > 0 {
                info!("Pruned {} expired sessions", count);
            } else {
                debug!("No expired sessions to prune");
            }
        }
    })
}
