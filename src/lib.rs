//! TuneScout server library
//!
//! This library exposes the internal modules for testing and for the
//! command line tools.

pub mod catalog_search;
pub mod config;
pub mod server;
pub mod store;
pub mod user;

// Re-export commonly used types for convenience
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use store::{FullStore, InMemoryStore};
pub use user::UserManager;
