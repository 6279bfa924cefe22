// ABOUTME: Tag input type definitions
// ABOUTME: Structures accepted by the tag and alias stores

use serde::{Deserialize, Serialize};
use tagkeep_core::{ActorId, TagName};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreateInput {
    pub name: TagName,
    pub content: String,
    pub owner_id: ActorId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasCreateInput {
    pub name: TagName,
    /// Name of the tag (or of another alias of it) to point at
    pub target: TagName,
    pub owner_id: ActorId,
}
