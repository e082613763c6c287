mod auth_routes;
mod body;
pub mod config;
pub mod error;
mod http_layers;
mod playlist_routes;
mod responses;
mod search;
pub mod server;
pub mod session;
mod song_routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use session::cookie_key_from_secret;
