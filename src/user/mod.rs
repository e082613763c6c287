pub mod auth;
mod session_sweeper;
mod user_manager;

pub use auth::{CredentialHasher, SessionToken};
pub use session_sweeper::spawn_session_sweeper;
pub use user_manager::{AuthError, UserManager};
