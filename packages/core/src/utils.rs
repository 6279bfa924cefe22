// ABOUTME: Shared utility functions for Tagkeep
// ABOUTME: ID generation and text helpers used when storing and rendering tags

use std::sync::LazyLock;

use regex::Regex;

static MARKDOWN_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\*_~|`>]").expect("markdown pattern is valid"));

/// Generate a unique tag ID
pub fn generate_tag_id() -> String {
    format!("tag-{}", nanoid::nanoid!())
}

/// Generate a unique tag alias ID
pub fn generate_alias_id() -> String {
    format!("alias-{}", nanoid::nanoid!())
}

/// Truncate `text` to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Turn a tag name into a display title: underscores become spaces and every
/// word starts with an uppercase letter.
pub fn title_case(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if previous_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            title.push(c);
            previous_is_letter = false;
        }
    }

    title
}

/// Escape markdown control characters so the text displays literally
pub fn escape_markdown(text: &str) -> String {
    MARKDOWN_CHARACTERS.replace_all(text, r"\$0").into_owned()
}
