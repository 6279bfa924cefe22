// ABOUTME: Page sources for tags
// ABOUTME: A generic fixed-size paginator with single-tag and tag-list variants formatted on demand

use std::sync::Arc;

use tagkeep_core::{Tag, Translator};

use crate::page::{render_tag_entry, Page, PageField};

/// Something that can format a page given its index.
pub trait PageSource: Send + Sync {
    fn page_count(&self) -> usize;

    /// Format page `index`, or `None` past the last page
    fn get_page(&self, index: usize) -> Option<Page>;

    /// Whether there is more than one page to move between
    fn is_paginating(&self) -> bool {
        self.page_count() > 1
    }

    fn pages(&self) -> Pages<'_>
    where
        Self: Sized,
    {
        Pages::new(self)
    }
}

/// Lazy iterator over the pages of a source
pub struct Pages<'a> {
    source: &'a dyn PageSource,
    next: usize,
}

impl<'a> Pages<'a> {
    pub fn new(source: &'a dyn PageSource) -> Self {
        Self { source, next: 0 }
    }
}

impl Iterator for Pages<'_> {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        let page = self.source.get_page(self.next)?;
        self.next += 1;
        Some(page)
    }
}

/// Entries grouped into fixed-size pages.
///
/// There is always at least one page; an empty paginator has one empty page.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    entries: Vec<T>,
    per_page: usize,
}

impl<T> Paginator<T> {
    pub fn new(entries: Vec<T>, per_page: usize) -> Self {
        Self {
            entries,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.per_page).max(1)
    }

    /// The entries on page `index`
    pub fn entries_for(&self, index: usize) -> Option<&[T]> {
        if index >= self.page_count() {
            return None;
        }

        let start = (index * self.per_page).min(self.entries.len());
        let end = (start + self.per_page).min(self.entries.len());
        Some(&self.entries[start..end])
    }
}

/// Pages showing the content of a single tag
pub struct TagPageSource {
    tag: Tag,
    entries: Paginator<String>,
    public_base_url: String,
}

impl TagPageSource {
    pub fn new(tag: Tag, public_base_url: impl Into<String>) -> Self {
        // The whole body is one entry for now
        let entries = Paginator::new(vec![tag.content.clone()], 1);

        Self {
            tag,
            entries,
            public_base_url: public_base_url.into(),
        }
    }
}

impl PageSource for TagPageSource {
    fn page_count(&self) -> usize {
        self.entries.page_count()
    }

    fn get_page(&self, index: usize) -> Option<Page> {
        let entries = self.entries.entries_for(index)?;
        let entry = entries.first().map(String::as_str).unwrap_or_default();
        Some(render_tag_entry(&self.tag, entry, &self.public_base_url))
    }
}

/// Pages listing tags with their counters
pub struct TagListPageSource {
    tags: Paginator<Tag>,
    translator: Arc<dyn Translator>,
    public_base_url: String,
}

impl TagListPageSource {
    pub fn new(
        tags: Vec<Tag>,
        per_page: usize,
        translator: Arc<dyn Translator>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            tags: Paginator::new(tags, per_page),
            translator,
            public_base_url: public_base_url.into(),
        }
    }
}

impl PageSource for TagListPageSource {
    fn page_count(&self) -> usize {
        self.tags.page_count()
    }

    fn get_page(&self, index: usize) -> Option<Page> {
        let tags = self.tags.entries_for(index)?;

        let fields = tags
            .iter()
            .map(|tag| PageField {
                name: tag.name.clone(),
                value: self.translator.translate(
                    "{u} uses, {r} revisions.",
                    &[
                        ("u", tag.uses.to_string()),
                        ("r", tag.revisions.to_string()),
                    ],
                ),
                inline: false,
            })
            .collect();

        let base_url = self.public_base_url.trim_end_matches('/');
        Some(Page {
            url: Some(format!("{}/tags", base_url)),
            fields,
            ..Page::default()
        })
    }
}

/// Pages for displaying one tag
pub fn paginate_single(tag: Tag, public_base_url: impl Into<String>) -> TagPageSource {
    TagPageSource::new(tag, public_base_url)
}

/// Pages for listing tags, `per_page` at a time
pub fn paginate_list(
    tags: Vec<Tag>,
    per_page: usize,
    translator: Arc<dyn Translator>,
    public_base_url: impl Into<String>,
) -> TagListPageSource {
    TagListPageSource::new(tags, per_page, translator, public_base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tagkeep_core::{ActorId, DefaultTranslator};

    fn tag(name: &str, uses: i64, revisions: i64) -> Tag {
        Tag {
            id: format!("tag-{}", name),
            name: name.to_string(),
            content: format!("Content of {}", name),
            owner_id: ActorId::new("owner"),
            uses,
            revisions,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_paginator_groups_entries() {
        let paginator = Paginator::new((0..23).collect::<Vec<_>>(), 10);

        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.entries_for(0).unwrap().len(), 10);
        assert_eq!(paginator.entries_for(2).unwrap(), &[20, 21, 22]);
        assert!(paginator.entries_for(3).is_none());
    }

    #[test]
    fn test_paginator_edge_sizes() {
        let empty: Paginator<u8> = Paginator::new(Vec::new(), 10);
        assert_eq!(empty.page_count(), 1);
        assert_eq!(empty.entries_for(0).unwrap().len(), 0);

        let exact = Paginator::new(vec![1, 2, 3, 4], 2);
        assert_eq!(exact.page_count(), 2);

        // A zero page size is treated as one entry per page
        let zero = Paginator::new(vec![1, 2], 0);
        assert_eq!(zero.per_page(), 1);
        assert_eq!(zero.page_count(), 2);
    }

    #[test]
    fn test_single_tag_has_one_page() {
        let source = paginate_single(tag("rules", 0, 0), "https://tags.example.com");

        assert_eq!(source.page_count(), 1);
        assert!(!source.is_paginating());

        let page = source.get_page(0).unwrap();
        assert_eq!(page.title.as_deref(), Some("Rules"));
        assert_eq!(page.description.as_deref(), Some("Content of rules"));
        assert!(source.get_page(1).is_none());
    }

    #[test]
    fn test_list_pages_show_counters() {
        let tags: Vec<_> = (0..12)
            .map(|i| tag(&format!("tag{}", i), 12 - i, i))
            .collect();
        let source = paginate_list(
            tags,
            10,
            Arc::new(DefaultTranslator),
            "https://tags.example.com",
        );

        assert_eq!(source.page_count(), 2);
        assert!(source.is_paginating());

        let first = source.get_page(0).unwrap();
        assert_eq!(first.fields.len(), 10);
        assert_eq!(first.url.as_deref(), Some("https://tags.example.com/tags"));
        assert_eq!(
            first.fields[0],
            PageField {
                name: "tag0".to_string(),
                value: "12 uses, 0 revisions.".to_string(),
                inline: false,
            }
        );

        let second = source.get_page(1).unwrap();
        assert_eq!(second.fields.len(), 2);
        assert_eq!(second.fields[1].value, "1 uses, 11 revisions.");
    }

    #[test]
    fn test_pages_iterates_lazily_over_every_page() {
        let tags: Vec<_> = (0..25).map(|i| tag(&format!("t{}", i), 0, 0)).collect();
        let source = paginate_list(tags, 10, Arc::new(DefaultTranslator), "https://x.test");

        let field_counts: Vec<_> = source.pages().map(|p| p.fields.len()).collect();
        assert_eq!(field_counts, vec![10, 10, 5]);

        assert_eq!(source.pages().take(1).count(), 1);
    }
}
