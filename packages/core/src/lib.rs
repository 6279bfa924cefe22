// ABOUTME: Core types, traits, and utilities for Tagkeep
// ABOUTME: Foundational package providing shared functionality across all Tagkeep packages

pub mod constants;
pub mod localization;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{ActorId, Tag, TagAlias};

// Re-export constants
pub use constants::{
    default_database_path, tagkeep_dir, MAX_PAGE_DESCRIPTION_LENGTH, MAX_TAG_NAME_LENGTH,
};

// Re-export localization
pub use localization::{interpolate, DefaultTranslator, Translator};

// Re-export utilities
pub use utils::{escape_markdown, generate_alias_id, generate_tag_id, title_case, truncate_chars};

// Re-export validation
pub use validation::{validate_tag_name, TagName, ValidationError, FORBIDDEN_NAME_CHARACTERS};
