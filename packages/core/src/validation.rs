// ABOUTME: Name validation for tags and aliases
// ABOUTME: Normalizes raw input into a TagName or explains why it was rejected

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_TAG_NAME_LENGTH;

/// Characters that may never appear in a tag or alias name
pub const FORBIDDEN_NAME_CHARACTERS: [char; 6] = [' ', '/', '#', '?', '&', ':'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing tag name")]
    EmptyName,

    #[error("Tag names can't contain `{0}`")]
    ForbiddenCharacter(char),

    #[error("Tag name is a maximum of {max} characters (got {length})")]
    TooLong { length: usize, max: usize },
}

impl ValidationError {
    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty",
            ValidationError::ForbiddenCharacter(_) => "forbidden character",
            ValidationError::TooLong { .. } => "too long",
        }
    }
}

/// A normalized, validated tag or alias name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for TagName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TagName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_tag_name(s)
    }
}

impl TryFrom<String> for TagName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_tag_name(&value)
    }
}

impl From<TagName> for String {
    fn from(name: TagName) -> Self {
        name.0
    }
}

/// Trim and lowercase `raw`, then check it against the naming rules
pub fn validate_tag_name(raw: &str) -> Result<TagName, ValidationError> {
    let normalized = raw.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if let Some(c) = FORBIDDEN_NAME_CHARACTERS
        .iter()
        .copied()
        .find(|c| normalized.contains(*c))
    {
        return Err(ValidationError::ForbiddenCharacter(c));
    }

    let length = normalized.chars().count();
    if length > MAX_TAG_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_TAG_NAME_LENGTH,
        });
    }

    Ok(TagName(normalized))
}
