use tagkeep_core::ValidationError;
use tagkeep_storage::StorageError;
use thiserror::Error;

/// Errors returned by tag and alias operations
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Invalid tag name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("A tag or alias named `{0}` already exists")]
    AlreadyExists(String),

    #[error("There is no tag named `{0}`")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for TagError {
    fn from(err: sqlx::Error) -> Self {
        TagError::Storage(StorageError::Sqlx(err))
    }
}

pub type TagResult<T> = Result<T, TagError>;
