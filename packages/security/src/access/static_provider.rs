use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tagkeep_core::ActorId;

use super::{AccessError, AccessLevel, Actor, PermissionProvider, PlatformPermission};

/// Permission provider backed by fixed tables, for operators and tests.
///
/// Bot owners always have `AccessLevel::BotOwner` and every platform permission.
#[derive(Debug, Clone)]
pub struct StaticPermissions {
    default_level: AccessLevel,
    levels: HashMap<ActorId, AccessLevel>,
    permissions: HashMap<ActorId, HashSet<PlatformPermission>>,
    owners: HashSet<ActorId>,
}

impl Default for StaticPermissions {
    fn default() -> Self {
        Self::new(AccessLevel::Default)
    }
}

impl StaticPermissions {
    pub fn new(default_level: AccessLevel) -> Self {
        Self {
            default_level,
            levels: HashMap::new(),
            permissions: HashMap::new(),
            owners: HashSet::new(),
        }
    }

    pub fn with_level(mut self, actor: impl Into<ActorId>, level: AccessLevel) -> Self {
        self.levels.insert(actor.into(), level);
        self
    }

    pub fn with_permission(
        mut self,
        actor: impl Into<ActorId>,
        permission: PlatformPermission,
    ) -> Self {
        self.permissions
            .entry(actor.into())
            .or_default()
            .insert(permission);
        self
    }

    pub fn with_owner(mut self, actor: impl Into<ActorId>) -> Self {
        self.owners.insert(actor.into());
        self
    }

    pub fn owners(&self) -> &HashSet<ActorId> {
        &self.owners
    }
}

#[async_trait]
impl PermissionProvider for StaticPermissions {
    async fn access_level(&self, actor: &Actor) -> Result<AccessLevel, AccessError> {
        if self.owners.contains(&actor.id) {
            return Ok(AccessLevel::BotOwner);
        }

        Ok(self
            .levels
            .get(&actor.id)
            .copied()
            .unwrap_or(self.default_level))
    }

    async fn has_permission(
        &self,
        actor: &Actor,
        permission: PlatformPermission,
    ) -> Result<bool, AccessError> {
        if self.owners.contains(&actor.id) {
            return Ok(true);
        }

        Ok(self
            .permissions
            .get(&actor.id)
            .is_some_and(|granted| granted.contains(&permission)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str) -> Actor {
        Actor::new(id, None)
    }

    #[tokio::test]
    async fn test_levels_fall_back_to_default() {
        let provider = StaticPermissions::new(AccessLevel::Trusted)
            .with_level("mod", AccessLevel::BotModerator);

        assert_eq!(
            provider.access_level(&actor("mod")).await.unwrap(),
            AccessLevel::BotModerator
        );
        assert_eq!(
            provider.access_level(&actor("someone")).await.unwrap(),
            AccessLevel::Trusted
        );
    }

    #[tokio::test]
    async fn test_owners_have_everything() {
        let provider = StaticPermissions::default()
            .with_level("owner", AccessLevel::Banned)
            .with_owner("owner");

        assert_eq!(
            provider.access_level(&actor("owner")).await.unwrap(),
            AccessLevel::BotOwner
        );
        assert!(provider
            .has_permission(&actor("owner"), PlatformPermission::ManageGuild)
            .await
            .unwrap());
        assert!(provider.owners().contains(&ActorId::new("owner")));
    }

    #[tokio::test]
    async fn test_permissions_are_per_actor() {
        let provider = StaticPermissions::default()
            .with_permission("admin", PlatformPermission::Administrator);

        assert!(provider
            .has_permission(&actor("admin"), PlatformPermission::Administrator)
            .await
            .unwrap());
        assert!(!provider
            .has_permission(&actor("admin"), PlatformPermission::ManageMessages)
            .await
            .unwrap());
        assert!(!provider
            .has_permission(&actor("other"), PlatformPermission::Administrator)
            .await
            .unwrap());
    }
}
