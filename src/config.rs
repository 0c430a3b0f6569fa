// src/config.rs
use std::env;
use thiserror::Error;

/// `DATABASE_URL` value that selects the process-local store.
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    allowed_origins: Vec<String>,
    track_inventory: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://nexus.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:5001".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

const DEFAULT_MAX_CONNECTIONS: u32 = 8;

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_database_url);
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got `{raw}`"
                    ))
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        let track_inventory = match lookup("AUDIT_TRACK_INVENTORY") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "AUDIT_TRACK_INVENTORY must be true/false or 1/0, got `{raw}`"
                ))
            })?,
            None => true,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            allowed_origins,
            track_inventory,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Whether inventory rows get audit hooks.
    pub fn track_inventory(&self) -> bool {
        self.track_inventory
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
