// ABOUTME: Access control for Tagkeep
// ABOUTME: Access tiers, platform permissions, the access gate, and per-scope feature enablement

pub mod access;
pub mod scope;

// Re-export main types for convenience
pub use access::{
    AccessError, AccessGate, AccessLevel, Actor, PermissionProvider, PlatformPermission,
    Requirement, StaticPermissions, MODERATOR_TIER,
};
pub use scope::ScopeGate;
