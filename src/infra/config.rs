//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, bail, Context};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "memory" => Ok(Backend::Memory),
            other => Err(anyhow!(
                "BOOKSTORE_BACKEND must be `postgres` or `memory`, got `{}`",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    /// Required for the Postgres backend, ignored otherwise.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("BOOKSTORE_BACKEND") {
            Some(v) => v.parse()?,
            None => Backend::Postgres,
        };

        let database_url = get("DATABASE_URL");
        if backend == Backend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set (or use BOOKSTORE_BACKEND=memory)");
        }

        let host = match get("HOST") {
            Some(v) => v
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("HOST must be an IP address, got `{}`", v))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid u16, got `{}`", v))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32, got `{}`", v))?
                .max(1),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            backend,
            database_url,
            host,
            port,
            max_connections,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The connection string with any password replaced, for logging.
    pub fn redacted_database_url(&self) -> Option<String> {
        let url = self.database_url.as_deref()?;
        let Some((scheme, rest)) = url.split_once("://") else {
            return Some(url.to_string());
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return Some(url.to_string());
        };
        let user = credentials.split(':').next().unwrap_or_default();
        Some(format!("{}://{}:***@{}", scheme, user, host))
    }
}
