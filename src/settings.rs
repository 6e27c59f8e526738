//! Runtime settings from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/ecoleta";
pub const DEFAULT_BIND: &str = "0.0.0.0:3333";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3333";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_IBGE_URL: &str = "https://servicodados.ibge.gov.br";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Which `Store` implementation backs the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    /// In-process tables, seeded on startup. Nothing survives a restart.
    Memory,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            other => Err(ConfigError::UnknownStorage(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub storage: StorageKind,
    pub bind: SocketAddr,
    /// Prefix for every `image_url` handed to clients, e.g. `http://192.168.0.6:3333`.
    pub public_url: String,
    pub uploads_dir: PathBuf,
    /// Bundled files (item icons) served under `/uploads` when no upload matches.
    pub assets_dir: PathBuf,
    pub max_connections: u32,
    /// Request body cap in bytes; uploads count against it.
    pub body_limit: usize,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, so callers (and tests) control the source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string());

        let storage = get("ECOLETA_STORAGE", "postgres").parse()?;
        let bind = parse_var("ECOLETA_BIND", get("ECOLETA_BIND", DEFAULT_BIND))?;
        let max_connections = parse_var(
            "ECOLETA_MAX_CONNECTIONS",
            get("ECOLETA_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string()),
        )?;
        let body_limit = parse_var(
            "ECOLETA_BODY_LIMIT",
            get("ECOLETA_BODY_LIMIT", &DEFAULT_BODY_LIMIT.to_string()),
        )?;

        Ok(Settings {
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            storage,
            bind,
            public_url: get("ECOLETA_PUBLIC_URL", DEFAULT_PUBLIC_URL).trim_end_matches('/').to_string(),
            uploads_dir: PathBuf::from(get("ECOLETA_UPLOADS_DIR", DEFAULT_UPLOADS_DIR)),
            assets_dir: PathBuf::from(get("ECOLETA_ASSETS_DIR", DEFAULT_ASSETS_DIR)),
            max_connections,
            body_limit,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            storage: StorageKind::Postgres,
            bind: SocketAddr::from(([0, 0, 0, 0], 3333)),
            public_url: DEFAULT_PUBLIC_URL.into(),
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let s = settings_from(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.storage, StorageKind::Postgres);
        assert_eq!(s.bind.port(), 3333);
        assert_eq!(s.public_url, DEFAULT_PUBLIC_URL);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
    }

    #[test]
    fn directories_follow_environment() {
        let s = settings_from(&[("ECOLETA_UPLOADS_DIR", "/srv/uploads"), ("ECOLETA_ASSETS_DIR", "/srv/icons")]).unwrap();
        assert_eq!(s.uploads_dir, PathBuf::from("/srv/uploads"));
        assert_eq!(s.assets_dir, PathBuf::from("/srv/icons"));
    }

    #[test]
    fn public_url_drops_trailing_slash() {
        let s = settings_from(&[("ECOLETA_PUBLIC_URL", "http://192.168.0.6:3333/")]).unwrap();
        assert_eq!(s.public_url, "http://192.168.0.6:3333");
    }

    #[test]
    fn memory_storage_is_selectable() {
        let s = settings_from(&[("ECOLETA_STORAGE", "Memory")]).unwrap();
        assert_eq!(s.storage, StorageKind::Memory);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = settings_from(&[("ECOLETA_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "ECOLETA_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn rejects_unknown_storage() {
        assert!(matches!(
            settings_from(&[("ECOLETA_STORAGE", "redis")]),
            Err(ConfigError::UnknownStorage(_))
        ));
    }
}
