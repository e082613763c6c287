use anyhow::{Context, Result};
use axum_extra::extract::cookie::Key;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunescout_server::config::{AppConfig, CliConfig, FileConfig};
use tunescout_server::server::{cookie_key_from_secret, run_server, RequestsLoggingLevel};
use tunescout_server::store::{seed::SAMPLE_PASSWORD, seed_sample_data, FullStore, InMemoryStore};
use tunescout_server::user::{spawn_session_sweeper, UserManager};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the command line.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = "0.0.0.0")]
    pub bind_address: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Secret the session cookie signing key is derived from.
    #[clap(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    /// Lifetime of a login session in hours.
    #[clap(long, default_value_t = 24)]
    pub session_ttl_hours: u64,

    /// Interval in minutes between expired session sweeps.
    #[clap(long, default_value_t = 60)]
    pub session_sweep_interval_minutes: u64,

    /// Mark the session cookie as Secure (HTTPS only).
    #[clap(long)]
    pub secure_cookies: bool,

    /// Start with an empty store instead of the demo content.
    #[clap(long)]
    pub no_sample_data: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            bind_address: self.bind_address.clone(),
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            session_secret: self.session_secret.clone(),
            session_ttl_hours: self.session_ttl_hours,
            session_sweep_interval_minutes: self.session_sweep_interval_minutes,
            secure_cookies: self.secure_cookies,
            no_sample_data: self.no_sample_data,
        }
    }
}

fn make_cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => cookie_key_from_secret(secret),
        None => {
            warn!("No session secret configured, sessions will not survive a restart.");
            Key::generate()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    info!("Resolved configuration: {:?}", app_config);

    let store: Arc<dyn FullStore> = Arc::new(InMemoryStore::new());
    let user_manager = Arc::new(UserManager::new(store.clone(), app_config.session_ttl()));

    if app_config.sample_data {
        let password_hash = user_manager
            .hash_password(SAMPLE_PASSWORD)
            .context("Failed to hash the sample password")?;
        seed_sample_data(store.as_ref(), &password_hash)
            .context("Failed to seed sample data")?;
    }

    spawn_session_sweeper(user_manager.clone(), app_config.session_sweep_interval());

    let cookie_key = make_cookie_key(app_config.session.secret.as_deref());

    run_server(store, user_manager, app_config.server_config(), cookie_key).await
}
