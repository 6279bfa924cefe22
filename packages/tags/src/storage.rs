// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Handles creation, lookup with usage counting, edits, deletion, and popularity listing

use chrono::Utc;
use sqlx::SqlitePool;
use tagkeep_core::{generate_tag_id, Tag, TagName};
use tagkeep_storage::StorageError;
use tracing::{debug, info, warn};

use crate::aliases::AliasStorage;
use crate::error::{TagError, TagResult};
use crate::rows::row_to_tag;
use crate::types::TagCreateInput;

#[derive(Clone)]
pub struct TagStorage {
    pool: SqlitePool,
    aliases: AliasStorage,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        let aliases = AliasStorage::new(pool.clone());
        Self { pool, aliases }
    }

    /// The alias store sharing this store's database
    pub fn aliases(&self) -> &AliasStorage {
        &self.aliases
    }

    /// Create a new tag
    pub async fn create_tag(&self, input: TagCreateInput) -> TagResult<Tag> {
        if self.aliases.name_in_use(&input.name).await? {
            return Err(TagError::AlreadyExists(input.name.into_inner()));
        }

        let tag_id = generate_tag_id();
        let now = Utc::now();

        debug!("Creating tag: {} (name: {})", tag_id, input.name);

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO tag_names (name, kind) VALUES (?, 'tag')")
            .bind(input.name.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_insert_error(e, &input.name))?;

        let row = sqlx::query(
            r#"
            INSERT INTO tags (id, name, content, owner_id, uses, revisions, created_at, updated_at)
            VALUES (?, ?, ?, ?, 0, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&tag_id)
        .bind(input.name.as_str())
        .bind(&input.content)
        .bind(input.owner_id.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_insert_error(e, &input.name))?;

        tx.commit().await?;

        let tag = row_to_tag(&row)?;
        info!("Tag created: {} ({})", tag.name, tag.id);
        Ok(tag)
    }

    /// Get a single tag by ID
    pub async fn get_tag(&self, tag_id: &str) -> TagResult<Option<Tag>> {
        debug!("Fetching tag: {}", tag_id);

        let row = sqlx::query("SELECT * FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(row_to_tag(&r)?)),
            None => Ok(None),
        }
    }

    /// Resolve a tag or alias name to its tag without counting a use
    pub async fn resolve(&self, name: &TagName) -> TagResult<Tag> {
        self.aliases.resolve(name).await
    }

    /// Look up a tag by tag or alias name, optionally counting the use.
    ///
    /// The increment happens in a single statement, so concurrent lookups of
    /// the same tag never lose a count.
    pub async fn lookup(&self, name: &TagName, increment_uses: bool) -> TagResult<Tag> {
        let tag = self.aliases.resolve(name).await?;

        if !increment_uses {
            return Ok(tag);
        }

        debug!("Counting a use of tag: {}", tag.id);

        let row = sqlx::query("UPDATE tags SET uses = uses + 1 WHERE id = ? RETURNING *")
            .bind(&tag.id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(row_to_tag(&r)?),
            // Deleted between the resolve and the increment
            None => Err(TagError::NotFound(name.to_string())),
        }
    }

    /// Replace a tag's content and count the revision
    pub async fn edit_tag(&self, name: &TagName, content: &str) -> TagResult<Tag> {
        let tag = self.aliases.resolve(name).await?;
        let now = Utc::now();

        debug!("Editing tag: {}", tag.id);

        let row = sqlx::query(
            r#"
            UPDATE tags
            SET content = ?, revisions = revisions + 1, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(content)
        .bind(now)
        .bind(&tag.id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let edited = row_to_tag(&r)?;
                info!(
                    "Tag edited: {} (revision {})",
                    edited.name, edited.revisions
                );
                Ok(edited)
            }
            None => Err(TagError::NotFound(name.to_string())),
        }
    }

    /// Delete a tag permanently, together with every alias pointing at it.
    ///
    /// Returns the tag as it was just before deletion.
    pub async fn delete_tag(&self, name: &TagName) -> TagResult<Tag> {
        let tag = self.aliases.resolve(name).await?;

        debug!("Deleting tag: {}", tag.id);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM tag_names
            WHERE kind = 'alias'
              AND name IN (SELECT name FROM tag_aliases WHERE tag_id = ?)
            "#,
        )
        .bind(&tag.id)
        .execute(&mut *tx)
        .await?;

        let aliases_deleted = sqlx::query("DELETE FROM tag_aliases WHERE tag_id = ?")
            .bind(&tag.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(&tag.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(TagError::NotFound(name.to_string()));
        }

        sqlx::query("DELETE FROM tag_names WHERE name = ? AND kind = 'tag'")
            .bind(&tag.name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            "Tag deleted: {} ({}), along with {} alias(es)",
            tag.name, tag.id, aliases_deleted
        );
        Ok(tag)
    }

    /// List every tag, most used first. Ties are ordered by name.
    pub async fn list_by_popularity(&self) -> TagResult<Vec<Tag>> {
        let (tags, _) = self.list_tags_paginated(None, None).await?;
        Ok(tags)
    }

    /// List tags by popularity with pagination, along with the total count
    pub async fn list_tags_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> TagResult<(Vec<Tag>, i64)> {
        debug!("Fetching tags (limit: {:?}, offset: {:?})", limit, offset);

        let count = self.count_tags().await?;

        // SQLite treats a negative LIMIT as "no limit"
        let rows = sqlx::query("SELECT * FROM tags ORDER BY uses DESC, name ASC LIMIT ? OFFSET ?")
            .bind(limit.unwrap_or(-1))
            .bind(offset.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;

        let tags = rows
            .iter()
            .map(|row| row_to_tag(row).map_err(TagError::from))
            .collect::<TagResult<Vec<_>>>()?;

        Ok((tags, count))
    }

    /// Number of tags, aliases excluded
    pub async fn count_tags(&self) -> TagResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Map a failed tag insert onto the tag error taxonomy
fn classify_insert_error(err: sqlx::Error, name: &TagName) -> TagError {
    let err = StorageError::Sqlx(err);

    if err.is_unique_violation() {
        warn!("Lost a race creating tag {}: name already taken", name);
        TagError::AlreadyExists(name.to_string())
    } else {
        TagError::Storage(err)
    }
}
