mod file_config;

pub use file_config::{FileConfig, SessionConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::Path;
use std::time::Duration;

/// Ten years.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365 * 10;

/// One week.
pub const MAX_SESSION_SWEEP_INTERVAL_MINUTES: u64 = 60 * 24 * 7;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub session_secret: Option<String>,
    pub session_ttl_hours: u64,
    pub session_sweep_interval_minutes: u64,
    pub secure_cookies: bool,
    pub no_sample_data: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub sample_data: bool,
    pub session: SessionSettings,
}

#[derive(Clone)]
pub struct SessionSettings {
    /// When absent a random signing key is generated at startup.
    pub secret: Option<String>,
    pub ttl_hours: u64,
    pub sweep_interval_minutes: u64,
    pub secure_cookies: bool,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("ttl_hours", &self.ttl_hours)
            .field("sweep_interval_minutes", &self.sweep_interval_minutes)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let file_session = file.session.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());

        let logging_level = match file.logging_level {
            Some(level) => match parse_logging_level(&level) {
                Some(level) => level,
                None => bail!("Unknown logging_level in config file: {}", level),
            },
            None => cli.logging_level.clone(),
        };

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());
        if let Some(path) = &frontend_dir_path {
            if !Path::new(path).is_dir() {
                bail!("Frontend directory does not exist: {:?}", path);
            }
        }

        let sample_data = file.sample_data.unwrap_or(!cli.no_sample_data);

        let session = SessionSettings {
            secret: file_session
                .secret
                .or_else(|| cli.session_secret.clone())
                .filter(|secret| !secret.is_empty()),
            ttl_hours: file_session.ttl_hours.unwrap_or(cli.session_ttl_hours),
            sweep_interval_minutes: file_session
                .sweep_interval_minutes
                .unwrap_or(cli.session_sweep_interval_minutes),
            secure_cookies: file_session.secure_cookies.unwrap_or(cli.secure_cookies),
        };
        if session.ttl_hours == 0 || session.ttl_hours > MAX_SESSION_TTL_HOURS {
            bail!(
                "Session TTL must be between 1 and {} hours, got {}",
                MAX_SESSION_TTL_HOURS,
                session.ttl_hours
            );
        }
        if session.sweep_interval_minutes == 0
            || session.sweep_interval_minutes > MAX_SESSION_SWEEP_INTERVAL_MINUTES
        {
            bail!(
                "Session sweep interval must be between 1 and {} minutes, got {}",
                MAX_SESSION_SWEEP_INTERVAL_MINUTES,
                session.sweep_interval_minutes
            );
        }

        Ok(AppConfig {
            port,
            bind_address,
            logging_level,
            frontend_dir_path,
            sample_data,
            session,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            bind_address: self.bind_address.clone(),
            port: self.port,
            frontend_dir_path: self.frontend_dir_path.clone(),
            secure_cookies: self.session.secure_cookies,
            session_ttl: self.session_ttl(),
        }
    }

    /// `ttl_hours` is bounded by `resolve`, so the conversion cannot wrap.
    pub fn session_ttl(&self) -> chrono::Duration {
        let hours = i64::try_from(self.session.ttl_hours).unwrap_or(i64::MAX / 3600);
        chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session.sweep_interval_minutes * 60)
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> CliConfig {
        CliConfig {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            logging_level: RequestsLoggingLevel::Path,
            frontend_dir_path: None,
            session_secret: None,
            session_ttl_hours: 24,
            session_sweep_interval_minutes: 60,
            secure_cookies: false,
            no_sample_data: false,
        }
    }

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("body"),
            Some(RequestsLoggingLevel::Body)
        ));
        // Case insensitive
        assert!(matches!(
            parse_logging_level("PATH"),
            Some(RequestsLoggingLevel::Path)
        ));
        assert!(parse_logging_level("invalid").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            session_secret: Some("cli-secret".to_string()),
            no_sample_data: true,
            ..base_cli()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.logging_level, RequestsLoggingLevel::Path);
        assert!(!config.sample_data);
        assert_eq!(config.session.secret.as_deref(), Some("cli-secret"));
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
        assert_eq!(config.session_sweep_interval(), Duration::from_secs(3600));
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            session_secret: Some("cli-secret".to_string()),
            ..base_cli()
        };
        let file_config = FileConfig {
            port: Some(4000),
            logging_level: Some("body".to_string()),
            sample_data: Some(false),
            session: Some(SessionConfig {
                secret: Some("file-secret".to_string()),
                secure_cookies: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert!(!config.sample_data);
        assert_eq!(config.session.secret.as_deref(), Some("file-secret"));
        assert!(config.session.secure_cookies);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.session.ttl_hours, 24);

        let server_config = config.server_config();
        assert!(server_config.secure_cookies);
        assert_eq!(server_config.port, 4000);
    }

    #[test]
    fn test_resolve_rejects_unknown_logging_level() {
        let file_config = FileConfig {
            logging_level: Some("verbose".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&base_cli(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("logging_level"));
    }

    #[test]
    fn test_resolve_rejects_zero_durations() {
        let cli = CliConfig {
            session_ttl_hours: 0,
            ..base_cli()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());

        let cli = CliConfig {
            session_sweep_interval_minutes: 0,
            ..base_cli()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_rejects_oversized_durations() {
        let cli = CliConfig {
            session_ttl_hours: MAX_SESSION_TTL_HOURS,
            ..base_cli()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(
            config.session_ttl(),
            chrono::Duration::hours(MAX_SESSION_TTL_HOURS as i64)
        );

        for ttl_hours in [MAX_SESSION_TTL_HOURS + 1, 10_000_000_000, u64::MAX] {
            let cli = CliConfig {
                session_ttl_hours: ttl_hours,
                ..base_cli()
            };
            let err = AppConfig::resolve(&cli, None).unwrap_err();
            assert!(err.to_string().contains("Session TTL"));
        }

        let file_config = FileConfig {
            session: Some(SessionConfig {
                ttl_hours: Some(u64::MAX),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&base_cli(), Some(file_config)).is_err());

        let cli = CliConfig {
            session_sweep_interval_minutes: u64::MAX,
            ..base_cli()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_missing_frontend_dir_error() {
        let cli = CliConfig {
            frontend_dir_path: Some("/nonexistent/frontend".to_string()),
            ..base_cli()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let cli = CliConfig {
            session_secret: Some(String::new()),
            ..base_cli()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert!(config.session.secret.is_none());
    }
}
