// ABOUTME: Tag management for Tagkeep
// ABOUTME: Storage for tags and their aliases over a single shared namespace

pub mod aliases;
pub mod error;
mod rows;
pub mod storage;
pub mod types;

// Re-export main types
pub use aliases::AliasStorage;
pub use error::{TagError, TagResult};
pub use storage::TagStorage;
pub use tagkeep_core::{ActorId, Tag, TagAlias, TagName};
pub use types::{AliasCreateInput, TagCreateInput};
