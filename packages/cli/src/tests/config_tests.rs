use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tagkeep_core::ActorId;
use tagkeep_security::AccessLevel;

use crate::config::{Config, ConfigError, LOCAL_SCOPE};

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.actor, ActorId::new("operator"));
    assert_eq!(config.access_level, AccessLevel::BotModerator);
    assert!(config.owners.is_empty());
    assert_eq!(config.scope.as_deref(), Some(LOCAL_SCOPE));
    assert_eq!(config.tags.allowed_scopes, vec![LOCAL_SCOPE.to_string()]);
    assert_eq!(config.tags.list_page_size, 10);
    assert_eq!(config.tags.navigation_timeout, Duration::from_secs(180));
    assert!(config.database_path.ends_with("tagkeep.db"));
}

#[test]
fn test_config_with_all_custom() {
    let config = config_from(&[
        ("TAGKEEP_DB_PATH", "/tmp/tags.db"),
        ("TAGKEEP_ACTOR", "alice"),
        ("TAGKEEP_ACCESS_LEVEL", "trusted"),
        ("TAGKEEP_OWNERS", "owner-1, owner-2,,"),
        ("TAGKEEP_ALLOWED_SCOPES", "guild-1,guild-2"),
        ("TAGKEEP_SCOPE", "guild-2"),
        ("TAGKEEP_PUBLIC_URL", "https://tags.example.com"),
        ("TAGKEEP_NAV_TIMEOUT_SECS", "30"),
    ])
    .unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/tags.db"));
    assert_eq!(config.actor, ActorId::new("alice"));
    assert_eq!(config.access_level, AccessLevel::Trusted);
    assert_eq!(
        config.owners,
        vec![ActorId::new("owner-1"), ActorId::new("owner-2")]
    );
    assert_eq!(config.scope.as_deref(), Some("guild-2"));
    assert_eq!(config.tags.allowed_scopes, vec!["guild-1", "guild-2"]);
    assert_eq!(config.tags.public_base_url, "https://tags.example.com");
    assert_eq!(config.tags.navigation_timeout, Duration::from_secs(30));
}

#[test]
fn test_blank_scope_means_no_scope() {
    let config = config_from(&[("TAGKEEP_SCOPE", "  ")]).unwrap();
    assert_eq!(config.scope, None);
}

#[rstest]
#[case("bot_owner", AccessLevel::BotOwner)]
#[case("Server-Moderator", AccessLevel::ServerModerator)]
#[case("300", AccessLevel::BotModerator)]
#[case("0", AccessLevel::Banned)]
fn test_access_levels(#[case] value: &str, #[case] expected: AccessLevel) {
    let config = config_from(&[("TAGKEEP_ACCESS_LEVEL", value)]).unwrap();
    assert_eq!(config.access_level, expected);
}

#[test]
fn test_config_invalid_access_level() {
    let result = config_from(&[("TAGKEEP_ACCESS_LEVEL", "emperor")]);
    assert!(matches!(result, Err(ConfigError::InvalidAccessLevel(level)) if level == "emperor"));
}

#[rstest]
#[case("soon")]
#[case("-5")]
fn test_config_invalid_timeout(#[case] value: &str) {
    let result = config_from(&[("TAGKEEP_NAV_TIMEOUT_SECS", value)]);
    assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
}

#[test]
fn test_config_zero_timeout() {
    let result = config_from(&[("TAGKEEP_NAV_TIMEOUT_SECS", "0")]);
    assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
}

#[test]
fn test_config_empty_actor() {
    let result = config_from(&[("TAGKEEP_ACTOR", " ")]);
    assert!(matches!(result, Err(ConfigError::EmptyActor)));
}
