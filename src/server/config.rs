use super::RequestsLoggingLevel;
use chrono::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub bind_address: String,
    pub port: u16,
    pub frontend_dir_path: Option<String>,
    /// Marks the session cookie `Secure`.
    pub secure_cookies: bool,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            bind_address: "0.0.0.0".to_owned(),
            port: 5000,
            frontend_dir_path: None,
            secure_cookies: false,
            session_ttl: Duration::hours(24),
        }
    }
}
