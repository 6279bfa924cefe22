// ABOUTME: Access gate for mutating operations
// ABOUTME: Evaluates tier and permission requirements against an external permission provider

mod static_provider;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub use static_provider::StaticPermissions;
pub use types::{AccessLevel, Actor, PlatformPermission, Requirement};

/// Tier required by every mutating tag operation
pub const MODERATOR_TIER: AccessLevel = AccessLevel::BotModerator;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Access denied: requires {0}")]
    Denied(Requirement),

    #[error("This feature is not enabled here")]
    FeatureDisabled,

    #[error("Unknown access level: {0}")]
    UnknownLevel(String),

    #[error("Permission lookup failed: {0}")]
    Provider(String),
}

/// Source of truth for actors' tiers and platform permissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn access_level(&self, actor: &Actor) -> Result<AccessLevel, AccessError>;

    async fn has_permission(
        &self,
        actor: &Actor,
        permission: PlatformPermission,
    ) -> Result<bool, AccessError>;
}

#[derive(Clone)]
pub struct AccessGate {
    provider: Arc<dyn PermissionProvider>,
}

impl AccessGate {
    pub fn new(provider: Arc<dyn PermissionProvider>) -> Self {
        Self { provider }
    }

    /// Whether `actor` satisfies `required`
    pub async fn check(&self, actor: &Actor, required: Requirement) -> Result<bool, AccessError> {
        let allowed = match required {
            Requirement::None => true,
            Requirement::Level(minimum) => {
                let level = self.provider.access_level(actor).await?;
                debug!("Actor {} has access level {}", actor.id, level);
                level >= minimum
            }
            Requirement::Permission(permission) => {
                self.provider.has_permission(actor, permission).await?
            }
        };

        Ok(allowed)
    }

    /// Like `check`, but a refusal becomes `AccessError::Denied`
    pub async fn require(&self, actor: &Actor, required: Requirement) -> Result<(), AccessError> {
        if self.check(actor, required).await? {
            Ok(())
        } else {
            warn!("Denied {} to actor {}", required, actor.id);
            Err(AccessError::Denied(required))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn actor() -> Actor {
        Actor::new("user-1", Some("guild-1".to_string()))
    }

    fn gate(provider: MockPermissionProvider) -> AccessGate {
        AccessGate::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_no_requirement_never_asks_provider() {
        let provider = MockPermissionProvider::new();
        // No expectations: any call would panic
        let allowed = gate(provider)
            .check(&actor(), Requirement::None)
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn test_level_requirement_is_a_minimum() {
        for (level, expected) in [
            (AccessLevel::Banned, false),
            (AccessLevel::Default, false),
            (AccessLevel::ServerAdministrator, false),
            (AccessLevel::BotModerator, true),
            (AccessLevel::BotOwner, true),
        ] {
            let mut provider = MockPermissionProvider::new();
            provider
                .expect_access_level()
                .times(1)
                .returning(move |_| Ok(level));

            let allowed = gate(provider)
                .check(&actor(), Requirement::Level(MODERATOR_TIER))
                .await
                .unwrap();
            assert_eq!(allowed, expected, "level {}", level);
        }
    }

    #[tokio::test]
    async fn test_permission_requirement_asks_for_that_permission() {
        let mut provider = MockPermissionProvider::new();
        provider
            .expect_has_permission()
            .with(eq(actor()), eq(PlatformPermission::Administrator))
            .times(1)
            .returning(|_, _| Ok(true));

        let allowed = gate(provider)
            .check(
                &actor(),
                Requirement::Permission(PlatformPermission::Administrator),
            )
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn test_require_turns_refusal_into_denied() {
        let mut provider = MockPermissionProvider::new();
        provider
            .expect_access_level()
            .returning(|_| Ok(AccessLevel::Default));

        let result = gate(provider)
            .require(&actor(), Requirement::Level(MODERATOR_TIER))
            .await;
        assert!(matches!(
            result,
            Err(AccessError::Denied(Requirement::Level(AccessLevel::BotModerator)))
        ));
    }

    #[tokio::test]
    async fn test_provider_failures_propagate() {
        let mut provider = MockPermissionProvider::new();
        provider
            .expect_access_level()
            .returning(|_| Err(AccessError::Provider("roles unavailable".to_string())));

        let result = gate(provider)
            .check(&actor(), Requirement::Level(AccessLevel::Trusted))
            .await;
        assert!(matches!(result, Err(AccessError::Provider(_))));
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(AccessLevel::Banned < AccessLevel::Default);
        assert!(AccessLevel::ServerAdministrator < AccessLevel::BotModerator);
        assert!(AccessLevel::BotModerator < AccessLevel::BotOwner);
        for pair in AccessLevel::ALL.windows(2) {
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(
            "bot_moderator".parse::<AccessLevel>().unwrap(),
            AccessLevel::BotModerator
        );
        assert_eq!(
            "Bot-Owner".parse::<AccessLevel>().unwrap(),
            AccessLevel::BotOwner
        );
        assert_eq!("100".parse::<AccessLevel>().unwrap(), AccessLevel::Trusted);
        assert!(matches!(
            "superuser".parse::<AccessLevel>(),
            Err(AccessError::UnknownLevel(_))
        ));
    }
}
