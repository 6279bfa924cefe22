use tagkeep_core::ValidationError;
use tagkeep_pages::DisplayError;
use tagkeep_security::{AccessError, Requirement};
use tagkeep_storage::StorageError;
use tagkeep_tags::TagError;
use thiserror::Error;

/// Everything a tag command can fail with
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid tag name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("`{0}` already exists")]
    AlreadyExists(String),

    #[error("`{0}` was not found")]
    NotFound(String),

    #[error("Access denied: requires {0}")]
    AccessDenied(Requirement),

    #[error("Tags are not enabled here")]
    FeatureDisabled,

    #[error("Permission check failed: {0}")]
    Permission(AccessError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

impl CommandError {
    /// Failures the invoker cannot do anything about
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            CommandError::Permission(_) | CommandError::Storage(_) | CommandError::Display(_)
        )
    }
}

impl From<TagError> for CommandError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::InvalidName(e) => CommandError::InvalidName(e),
            TagError::AlreadyExists(name) => CommandError::AlreadyExists(name),
            TagError::NotFound(name) => CommandError::NotFound(name),
            TagError::Storage(e) => CommandError::Storage(e),
        }
    }
}

impl From<AccessError> for CommandError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(requirement) => CommandError::AccessDenied(requirement),
            AccessError::FeatureDisabled => CommandError::FeatureDisabled,
            other => CommandError::Permission(other),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
