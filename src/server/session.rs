use super::error::ApiError;
use super::state::ServerState;
use crate::store::User;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use std::convert::Infallible;
use tracing::debug;

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Derives the cookie signing key from a secret of any length.
pub fn cookie_key_from_secret(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn session_cookie(token: String, secure: bool, ttl: chrono::Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_TOKEN_KEY, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(COOKIE_SESSION_TOKEN_KEY).path("/").build()
}

pub async fn session_token_from_parts(parts: &mut Parts, ctx: &ServerState) -> Option<String> {
    let jar = SignedCookieJar::<Key>::from_request_parts(parts, ctx)
        .await
        .unwrap_or_else(|never| match never {});
    jar.get(COOKIE_SESSION_TOKEN_KEY)
        .map(|cookie| cookie.value().to_owned())
}

async fn extract_session_from_request_parts(
    parts: &mut Parts,
    ctx: &ServerState,
) -> Option<Session> {
    let token = match session_token_from_parts(parts, ctx).await {
        None => {
            debug!("No valid session cookie.");
            return None;
        }
        Some(token) => token,
    };

    match ctx.user_manager.resolve_identity(&token) {
        Some(user) => {
            debug!("Resolved session for user_id={}", user.id);
            Some(Session { user, token })
        }
        None => {
            debug!("Session token is unknown or expired.");
            None
        }
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx)
            .await
            .ok_or(ApiError::Unauthenticated)
    }
}

impl OptionalFromRequestParts<ServerState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(extract_session_from_request_parts(parts, ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_derivation_is_deterministic() {
        let first = cookie_key_from_secret("short");
        let second = cookie_key_from_secret("short");
        let other = cookie_key_from_secret("another secret");
        assert_eq!(first.signing(), second.signing());
        assert_ne!(first.signing(), other.signing());
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".to_owned(), true, chrono::Duration::hours(24));
        assert_eq!(cookie.name(), COOKIE_SESSION_TOKEN_KEY);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
    }
}
