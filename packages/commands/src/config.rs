use std::time::Duration;

use serde::{Deserialize, Serialize};
use tagkeep_core::constants::{
    DEFAULT_LIST_PAGE_SIZE, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_PUBLIC_BASE_URL,
};

/// Settings for the tag commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Scopes (guilds) where the commands answer at all
    pub allowed_scopes: Vec<String>,
    /// Base of the links rendered in tag pages
    pub public_base_url: String,
    /// Tags per page in `tags list`
    pub list_page_size: usize,
    /// Idle time after which page navigation stops
    pub navigation_timeout: Duration,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            allowed_scopes: Vec::new(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            navigation_timeout: Duration::from_secs(DEFAULT_NAVIGATION_TIMEOUT_SECS),
        }
    }
}

impl TagsConfig {
    pub fn with_allowed_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}
