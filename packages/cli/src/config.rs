use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use tagkeep_commands::TagsConfig;
use tagkeep_core::constants::{DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_PUBLIC_BASE_URL};
use tagkeep_core::{default_database_path, ActorId};
use tagkeep_security::AccessLevel;
use thiserror::Error;

/// Scope used when none is configured, so a fresh setup answers out of the box
pub const LOCAL_SCOPE: &str = "local";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid access level: {0}")]
    InvalidAccessLevel(String),
    #[error("Invalid navigation timeout: {0}")]
    InvalidTimeout(#[from] ParseIntError),
    #[error("Navigation timeout must be at least one second")]
    ZeroTimeout,
    #[error("TAGKEEP_ACTOR must not be empty")]
    EmptyActor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub actor: ActorId,
    pub access_level: AccessLevel,
    pub owners: Vec<ActorId>,
    pub scope: Option<String>,
    pub tags: TagsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("TAGKEEP_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let actor = lookup("TAGKEEP_ACTOR").unwrap_or_else(|| "operator".to_string());
        if actor.trim().is_empty() {
            return Err(ConfigError::EmptyActor);
        }

        let access_level =
            lookup("TAGKEEP_ACCESS_LEVEL").unwrap_or_else(|| "bot_moderator".to_string());
        let access_level = access_level
            .parse::<AccessLevel>()
            .map_err(|_| ConfigError::InvalidAccessLevel(access_level))?;

        let owners = split_list(lookup("TAGKEEP_OWNERS").as_deref().unwrap_or(""))
            .into_iter()
            .map(ActorId::new)
            .collect();

        let allowed_scopes = lookup("TAGKEEP_ALLOWED_SCOPES");
        let allowed_scopes = split_list(allowed_scopes.as_deref().unwrap_or(LOCAL_SCOPE));

        // An empty TAGKEEP_SCOPE acts like a direct message
        let scope = match lookup("TAGKEEP_SCOPE") {
            Some(scope) if scope.trim().is_empty() => None,
            Some(scope) => Some(scope.trim().to_string()),
            None => Some(LOCAL_SCOPE.to_string()),
        };

        let public_base_url =
            lookup("TAGKEEP_PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string());

        let timeout_secs = match lookup("TAGKEEP_NAV_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>()?,
            None => DEFAULT_NAVIGATION_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let tags = TagsConfig {
            allowed_scopes,
            public_base_url,
            navigation_timeout: Duration::from_secs(timeout_secs),
            ..TagsConfig::default()
        };

        Ok(Config {
            database_path,
            actor: ActorId::new(actor.trim()),
            access_level,
            owners,
            scope,
            tags,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
