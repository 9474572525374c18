//! Portal configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::{DEFAULT_PROVIDER_NAME, SameSite};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const SECS_PER_DAY: u64 = 24 * 3600;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Postgres connection string; without it the in-memory user store is used
    pub database_url: Option<String>,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
    /// Base URL of the auth provider
    pub provider_url: String,
    pub listen_addr: SocketAddr,
    /// Origins allowed to call the JSON API with credentials
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider_url = get("AUTH_PROVIDER_URL").context("AUTH_PROVIDER_URL must be set")?;
        if !provider_url.starts_with("http://") && !provider_url.starts_with("https://") {
            bail!("AUTH_PROVIDER_URL must be an http(s) URL, got {provider_url}");
        }

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address such as 0.0.0.0:31113")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut auth = if cfg!(debug_assertions) {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        auth.provider_name = get("AUTH_PROVIDER_NAME").unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string());
        if let Some(name) = get("SESSION_COOKIE_NAME") {
            auth.session_cookie_name = name;
        }
        if let Some(secure) = get("COOKIE_SECURE") {
            auth.cookie_secure = parse_bool("COOKIE_SECURE", &secure)?;
        }
        if let Some(same_site) = get("COOKIE_SAME_SITE") {
            auth.cookie_same_site = same_site
                .parse::<SameSite>()
                .map_err(anyhow::Error::msg)
                .context("COOKIE_SAME_SITE must be Strict, Lax or None")?;
        }
        if let Some(days) = get("REMEMBER_ME_DAYS") {
            let days: u64 = days
                .parse()
                .context("REMEMBER_ME_DAYS must be a whole number of days")?;
            let secs = days
                .checked_mul(SECS_PER_DAY)
                .with_context(|| format!("REMEMBER_ME_DAYS is too large: {days}"))?;
            auth.remember_me_ttl = Duration::from_secs(secs);
        }

        let run_migrations = match get("RUN_MIGRATIONS") {
            Some(value) => parse_bool("RUN_MIGRATIONS", &value)?,
            None => true,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            run_migrations,
            provider_url,
            listen_addr,
            frontend_origins,
            auth,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be true or false, got {other}"),
    }
}
