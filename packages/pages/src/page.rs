// ABOUTME: Page type and the tag page rendering rules
// ABOUTME: Pulls a trailing image link out of the body and caps the body length

use serde::{Deserialize, Serialize};
use tagkeep_core::{title_case, truncate_chars, Tag, MAX_PAGE_DESCRIPTION_LENGTH};

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".gif"];
const SECURE_URL_PREFIX: &str = "https://";

/// One unit of paginated output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub fields: Vec<PageField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Whether a single line should be shown as an embedded image
pub fn is_image_reference(line: &str) -> bool {
    !line.is_empty()
        && IMAGE_EXTENSIONS.iter().any(|ext| line.ends_with(ext))
        && line.starts_with(SECURE_URL_PREFIX)
        && !line.chars().any(char::is_whitespace)
}

/// Split `entry` into its text body and, when the last line is an image link,
/// that link.
pub fn split_trailing_image(entry: &str) -> (String, Option<String>) {
    let lines: Vec<&str> = entry.lines().collect();

    match lines.split_last() {
        Some((last, rest)) if is_image_reference(last) => {
            (rest.join("\n"), Some((*last).to_string()))
        }
        _ => (entry.to_string(), None),
    }
}

/// Render one entry of a tag's content as a page
pub fn render_tag_entry(tag: &Tag, entry: &str, public_base_url: &str) -> Page {
    let entry = if entry.is_empty() { " " } else { entry };
    let (body, image_url) = split_trailing_image(entry);
    let base_url = public_base_url.trim_end_matches('/');

    Page {
        title: Some(title_case(&tag.name)),
        url: Some(format!("{}/tags/{}", base_url, tag.name)),
        description: Some(truncate_chars(&body, MAX_PAGE_DESCRIPTION_LENGTH).to_string()),
        image_url,
        fields: Vec::new(),
    }
}
