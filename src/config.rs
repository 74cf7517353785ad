//! Process configuration from environment variables.

use crate::logic::IdPolicy;
use std::env;
use std::path::PathBuf;

/// Server settings. Override with env: HOST, PORT, DATA_DIR, ID_POLICY.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Snapshot directory; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub id_policy: IdPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: None,
            id_policy: IdPolicy::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Value of an env var, with blank treated as unset.
pub fn env_default(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_default)
    }

    /// Build from any key lookup (env in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                log::warn!("PORT={} is not a port number, using {}", p, default_port());
                default_port()
            }),
            None => default_port(),
        };
        let id_policy = match lookup("ID_POLICY") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                log::warn!("ID_POLICY={} not recognised, using sequential ids", p);
                IdPolicy::Sequential
            }),
            None => IdPolicy::Sequential,
        };
        Self {
            host,
            port,
            data_dir: lookup("DATA_DIR").map(PathBuf::from),
            id_policy,
        }
    }
}
