// ABOUTME: Alias storage and name resolution using SQLite
// ABOUTME: Resolves a name to its tag, directly or through an alias

use chrono::Utc;
use sqlx::SqlitePool;
use tagkeep_core::{generate_alias_id, Tag, TagAlias, TagName};
use tagkeep_storage::StorageError;
use tracing::{debug, info, warn};

use crate::error::{TagError, TagResult};
use crate::rows::{row_to_alias, row_to_tag};
use crate::types::AliasCreateInput;

#[derive(Clone)]
pub struct AliasStorage {
    pool: SqlitePool,
}

impl AliasStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether any tag or alias is registered under `name`
    pub async fn name_in_use(&self, name: &TagName) -> TagResult<bool> {
        let in_use: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tag_names WHERE name = ?)")
                .bind(name.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(in_use != 0)
    }

    /// Resolve a name to a tag: first as a tag name, then as an alias
    pub async fn resolve(&self, name: &TagName) -> TagResult<Tag> {
        debug!("Resolving tag name: {}", name);

        if let Some(row) = sqlx::query("SELECT * FROM tags WHERE name = ?")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(row_to_tag(&row)?);
        }

        let row = sqlx::query(
            r#"
            SELECT tags.*
            FROM tag_aliases
            JOIN tags ON tags.id = tag_aliases.tag_id
            WHERE tag_aliases.name = ?
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                debug!("Resolved alias {} through to its tag", name);
                Ok(row_to_tag(&r)?)
            }
            None => Err(TagError::NotFound(name.to_string())),
        }
    }

    /// Get an alias by its own name
    pub async fn get_alias(&self, name: &TagName) -> TagResult<Option<TagAlias>> {
        debug!("Fetching alias by name: {}", name);

        let row = sqlx::query("SELECT * FROM tag_aliases WHERE name = ?")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(row_to_alias(&r)?)),
            None => Ok(None),
        }
    }

    /// List the aliases pointing at a tag, by name
    pub async fn aliases_for(&self, tag_id: &str) -> TagResult<Vec<TagAlias>> {
        debug!("Fetching aliases for tag: {}", tag_id);

        let rows = sqlx::query("SELECT * FROM tag_aliases WHERE tag_id = ? ORDER BY name")
            .bind(tag_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row_to_alias(row).map_err(TagError::from))
            .collect()
    }

    /// Create an alias for an existing tag.
    ///
    /// The target may itself be an alias; the new alias then points at that
    /// alias's tag, so aliases never chain.
    pub async fn create_alias(&self, input: AliasCreateInput) -> TagResult<TagAlias> {
        if self.name_in_use(&input.name).await? {
            return Err(TagError::AlreadyExists(input.name.into_inner()));
        }

        let target = self.resolve(&input.target).await?;
        let alias_id = generate_alias_id();
        let now = Utc::now();

        debug!(
            "Creating alias: {} (name: {}, tag: {})",
            alias_id, input.name, target.id
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO tag_names (name, kind) VALUES (?, 'alias')")
            .bind(input.name.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_insert_error(e, &input.name, &input.target))?;

        let row = sqlx::query(
            r#"
            INSERT INTO tag_aliases (id, name, tag_id, owner_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&alias_id)
        .bind(input.name.as_str())
        .bind(&target.id)
        .bind(input.owner_id.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_insert_error(e, &input.name, &input.target))?;

        tx.commit().await?;

        let alias = row_to_alias(&row)?;
        info!(
            "Alias created: {} -> {} ({})",
            alias.name, target.name, alias.id
        );
        Ok(alias)
    }

    /// Delete an alias. The tag it points at is left alone.
    pub async fn delete_alias(&self, name: &TagName) -> TagResult<TagAlias> {
        debug!("Deleting alias: {}", name);

        let alias = self
            .get_alias(name)
            .await?
            .ok_or_else(|| TagError::NotFound(name.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM tag_aliases WHERE id = ?")
            .bind(&alias.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Someone else removed it in the meantime
            return Err(TagError::NotFound(name.to_string()));
        }

        sqlx::query("DELETE FROM tag_names WHERE name = ? AND kind = 'alias'")
            .bind(&alias.name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Alias deleted: {} ({})", alias.name, alias.id);
        Ok(alias)
    }
}

/// Map a failed alias insert onto the tag error taxonomy
fn classify_insert_error(err: sqlx::Error, name: &TagName, target: &TagName) -> TagError {
    let err = StorageError::Sqlx(err);

    if err.is_unique_violation() {
        warn!("Lost a race creating alias {}: name already taken", name);
        TagError::AlreadyExists(name.to_string())
    } else if err.is_foreign_key_violation() {
        warn!("Target of alias {} was deleted while creating it", name);
        TagError::NotFound(target.to_string())
    } else {
        TagError::Storage(err)
    }
}
