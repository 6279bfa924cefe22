use std::env;
use std::path::PathBuf;

/// Maximum length of a tag or alias name, in characters
pub const MAX_TAG_NAME_LENGTH: usize = 90;

/// Maximum length of the text body of a rendered page, in characters
pub const MAX_PAGE_DESCRIPTION_LENGTH: usize = 2047;

/// Number of tags shown per page when listing
pub const DEFAULT_LIST_PAGE_SIZE: usize = 10;

/// Idle time after which a navigation session ends
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 180;

/// Base URL used for the link in rendered tag pages
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://tagkeep.dev";

/// Get the path to the Tagkeep directory (~/.tagkeep)
pub fn tagkeep_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".tagkeep")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tagkeep")
    }
}

/// Get the path to the default database file (~/.tagkeep/tagkeep.db)
pub fn default_database_path() -> PathBuf {
    tagkeep_dir().join("tagkeep.db")
}
