use super::body::{required, JsonOrForm};
use super::error::ApiResult;
use super::responses::{AuthSuccessResponse, MessageResponse, ProfileResponse};
use super::session::{expired_session_cookie, session_cookie, Session, COOKIE_SESSION_TOKEN_KEY};
use super::state::{GuardedUserManager, ServerState};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
struct RegisterBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct LoginBody {
    username: Option<String>,
    password: Option<String>,
}

async fn register(
    State(user_manager): State<GuardedUserManager>,
    JsonOrForm(body): JsonOrForm<RegisterBody>,
) -> ApiResult<Json<AuthSuccessResponse>> {
    let username = required(body.username, "username")?;
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let user = user_manager.register(&username, &email, &password)?;
    info!("New user registered: {}", user.username);
    Ok(Json(AuthSuccessResponse {
        message: "User created successfully",
        user,
    }))
}

async fn login(
    State(state): State<ServerState>,
    jar: SignedCookieJar,
    JsonOrForm(body): JsonOrForm<LoginBody>,
) -> ApiResult<(SignedCookieJar, Json<AuthSuccessResponse>)> {
    let username = required(body.username, "username")?;
    let password = required(body.password, "password")?;

    let previous_token = jar
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(|cookie| cookie.value().to_owned());
    let (user, session) = state
        .user_manager
        .login(&username, &password, previous_token.as_deref())?;
    let cookie = session_cookie(
        session.id,
        state.config.secure_cookies,
        state.config.session_ttl,
    );
    Ok((
        jar.add(cookie),
        Json(AuthSuccessResponse {
            message: "Login successful",
            user,
        }),
    ))
}

/// Ends the current session, if any, and always clears the cookie.
async fn logout(
    State(user_manager): State<GuardedUserManager>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<MessageResponse>) {
    if let Some(cookie) = jar.get(COOKIE_SESSION_TOKEN_KEY) {
        user_manager.logout(cookie.value());
    }
    (
        jar.remove(expired_session_cookie()),
        Json(MessageResponse {
            message: "Logout successful",
        }),
    )
}

async fn get_profile(session: Session) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: session.user })
}

pub fn make_auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/user/profile", get(get_profile))
}
