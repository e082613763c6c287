use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::store::FullStore;
use crate::user::UserManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedStore = Arc<dyn FullStore>;
pub type GuardedUserManager = Arc<UserManager>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store: GuardedStore,
    pub user_manager: GuardedUserManager,
    /// Signs the session cookie.
    pub cookie_key: Key,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        store: GuardedStore,
        user_manager: GuardedUserManager,
        cookie_key: Key,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            store,
            user_manager,
            cookie_key,
        }
    }
}

impl FromRef<ServerState> for GuardedStore {
    fn from_ref(input: &ServerState) -> Self {
        input.store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for Key {
    fn from_ref(input: &ServerState) -> Self {
        input.cookie_key.clone()
    }
}
