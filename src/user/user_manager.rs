use super::auth::{CredentialHasher, SessionToken};
use crate::store::{FullStore, NewUser, SessionRecord, SessionStore, StoreError, User, UserStore};
use chrono::{Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Credential hashing failed: {0}")]
    Hashing(#[source] anyhow::Error),

    #[error("Session lifetime of {0} overflows the clock")]
    SessionTtlOutOfRange(Duration),
}

/// Registration, login and session resolution on top of a record store.
pub struct UserManager {
    store: Arc<dyn FullStore>,
    hasher: CredentialHasher,
    session_ttl: Duration,
}

impl UserManager {
    pub fn new(store: Arc<dyn FullStore>, session_ttl: Duration) -> Self {
        Self {
            store,
            hasher: CredentialHasher::default(),
            session_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        self.hasher.hash(password).map_err(AuthError::Hashing)
    }

    /// Creates a user with a hashed password.
    /// The username is checked before the email, so a request colliding on
    /// both reports the username.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<User, AuthError> {
        if self.store.find_user_by_username(username).is_some() {
            return Err(StoreError::UsernameTaken.into());
        }
        if self.store.find_user_by_email(email).is_some() {
            return Err(StoreError::EmailTaken.into());
        }

        let password_hash = self.hash_password(password)?;
        // The store re-checks uniqueness under its lock.
        let user = self.store.create_user(NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash,
        })?;
        debug!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Verifies the credentials and opens a new session.
    /// Unknown usernames and wrong passwords are indistinguishable.
    /// On success the caller's `previous_token`, if any, is ended.
    pub fn login(
        &self,
        username: &str,
        password: &str,
        previous_token: Option<&str>,
    ) -> Result<(User, SessionRecord), AuthError> {
        let user = self
            .store
            .find_user_by_username(username)
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = match self.hasher.verify(password, &user.password_hash) {
            Ok(verified) => verified,
            Err(err) => {
                warn!("Stored hash of user {} is unreadable: {}", user.id, err);
                false
            }
        };
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.session_ttl)
            .ok_or(AuthError::SessionTtlOutOfRange(self.session_ttl))?;

        if let Some(previous_token) = previous_token {
            if self.store.delete_session(previous_token) {
                debug!("Replaced previous session of user {}", user.id);
            }
        }

        let session = SessionRecord {
            id: SessionToken::generate().0,
            user_id: user.id.clone(),
            expires_at,
        };
        self.store.add_session(session.clone());
        debug!("Opened session for user {}", user.id);
        Ok((user, session))
    }

    /// Returns the user behind a live session token.
    pub fn resolve_identity(&self, token: &str) -> Option<User> {
        let session = self.store.get_session(token, Utc::now())?;
        let user = self.store.get_user(&session.user_id);
        if user.is_none() {
            debug!("Session {} points to a missing user", token);
        }
        user
    }

    /// Returns whether a session was removed.
    pub fn logout(&self, token: &str) -> bool {
        self.store.delete_session(token)
    }

    pub fn sweep_expired_sessions(&self) -> usize {
        self.store.prune_expired_sessions(Utc::now())
    }
}
