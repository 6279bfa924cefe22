// ABOUTME: Access control type definitions
// ABOUTME: Ordered access tiers, platform permission flags, and gate requirements

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tagkeep_core::ActorId;

use super::AccessError;

/// Ordered access tiers. A higher tier includes every lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Banned,
    Default,
    Trusted,
    ServerModerator,
    ServerAdministrator,
    BotModerator,
    BotOwner,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 7] = [
        AccessLevel::Banned,
        AccessLevel::Default,
        AccessLevel::Trusted,
        AccessLevel::ServerModerator,
        AccessLevel::ServerAdministrator,
        AccessLevel::BotModerator,
        AccessLevel::BotOwner,
    ];

    /// Numeric value of the tier
    pub fn value(&self) -> u16 {
        match self {
            AccessLevel::Banned => 0,
            AccessLevel::Default => 50,
            AccessLevel::Trusted => 100,
            AccessLevel::ServerModerator => 150,
            AccessLevel::ServerAdministrator => 200,
            AccessLevel::BotModerator => 300,
            AccessLevel::BotOwner => 500,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AccessLevel::Banned => "banned",
            AccessLevel::Default => "default",
            AccessLevel::Trusted => "trusted",
            AccessLevel::ServerModerator => "server_moderator",
            AccessLevel::ServerAdministrator => "server_administrator",
            AccessLevel::BotModerator => "bot_moderator",
            AccessLevel::BotOwner => "bot_owner",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = AccessError;

    /// Accepts a tier name (`bot_moderator`) or its numeric value (`300`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('-', "_");

        AccessLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == name || level.value().to_string() == name)
            .ok_or_else(|| AccessError::UnknownLevel(s.to_string()))
    }
}

/// Permission flags granted by the host platform itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformPermission {
    Administrator,
    ManageGuild,
    ManageMessages,
}

impl PlatformPermission {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformPermission::Administrator => "administrator",
            PlatformPermission::ManageGuild => "manage_guild",
            PlatformPermission::ManageMessages => "manage_messages",
        }
    }
}

impl fmt::Display for PlatformPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an actor needs to pass the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    None,
    Level(AccessLevel),
    Permission(PlatformPermission),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::None => f.write_str("nothing"),
            Requirement::Level(level) => write!(f, "access level {}", level),
            Requirement::Permission(permission) => write!(f, "permission {}", permission),
        }
    }
}

/// An actor as seen by the gate: who they are and where they are acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    /// Container the request came from (a guild), `None` for direct messages
    pub scope: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, scope: Option<String>) -> Self {
        Self {
            id: id.into(),
            scope,
        }
    }
}
