use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tagkeep_core::{ActorId, Tag, TagAlias};
use tagkeep_storage::StorageError;

/// Convert a database row to a Tag
pub(crate) fn row_to_tag(row: &SqliteRow) -> Result<Tag, StorageError> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        content: row.try_get("content")?,
        owner_id: ActorId::new(row.try_get::<String, _>("owner_id")?),
        uses: row.try_get("uses")?,
        revisions: row.try_get("revisions")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Convert a database row to a TagAlias
pub(crate) fn row_to_alias(row: &SqliteRow) -> Result<TagAlias, StorageError> {
    Ok(TagAlias {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        tag_id: row.try_get("tag_id")?,
        owner_id: ActorId::new(row.try_get::<String, _>("owner_id")?),
        created_at: row.try_get("created_at")?,
    })
}
