// ABOUTME: Integration tests for tag and alias storage operations
// ABOUTME: Tests the shared namespace, alias resolution, counters, deletion cascade, and races

use pretty_assertions::assert_eq;
use tagkeep_core::{validate_tag_name, ActorId, TagName};
use tagkeep_storage::{connect, StorageConfig};
use tagkeep_tags::{AliasCreateInput, TagCreateInput, TagError, TagStorage};
use tempfile::TempDir;

/// Helper to create a file-backed database for testing.
///
/// The TempDir must be kept alive for as long as the storage is used.
async fn create_test_storage() -> (TagStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = StorageConfig::file(temp_dir.path().join("tags.db"));
    config.max_connections = 4;

    let pool = connect(&config).await.unwrap();
    (TagStorage::new(pool), temp_dir)
}

fn name(raw: &str) -> TagName {
    validate_tag_name(raw).unwrap()
}

fn moderator() -> ActorId {
    ActorId::new("moderator-1")
}

async fn create(storage: &TagStorage, tag_name: &str, content: &str) -> tagkeep_tags::Tag {
    storage
        .create_tag(TagCreateInput {
            name: name(tag_name),
            content: content.to_string(),
            owner_id: moderator(),
        })
        .await
        .unwrap()
}

async fn alias(
    storage: &TagStorage,
    alias_name: &str,
    target: &str,
) -> Result<tagkeep_tags::TagAlias, TagError> {
    storage
        .aliases()
        .create_alias(AliasCreateInput {
            name: name(alias_name),
            target: name(target),
            owner_id: moderator(),
        })
        .await
}

#[tokio::test]
async fn test_create_tag() {
    let (storage, _dir) = create_test_storage().await;

    let tag = create(&storage, "rules", "Be nice.").await;

    assert!(tag.id.starts_with("tag-"));
    assert_eq!(tag.name, "rules");
    assert_eq!(tag.content, "Be nice.");
    assert_eq!(tag.owner_id, moderator());
    assert_eq!(tag.uses, 0);
    assert_eq!(tag.revisions, 0);

    let fetched = storage.get_tag(&tag.id).await.unwrap().unwrap();
    assert_eq!(fetched, tag);
}

#[tokio::test]
async fn test_create_duplicate_tag_fails() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "faq", "See the docs").await;

    let result = storage
        .create_tag(TagCreateInput {
            name: name("FAQ"),
            content: "Other content".to_string(),
            owner_id: moderator(),
        })
        .await;

    assert!(matches!(result, Err(TagError::AlreadyExists(n)) if n == "faq"));
    assert_eq!(storage.count_tags().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_tag_with_alias_name_fails() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let result = storage
        .create_tag(TagCreateInput {
            name: name("r"),
            content: "shadowing".to_string(),
            owner_id: moderator(),
        })
        .await;

    assert!(matches!(result, Err(TagError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_create_alias_collisions() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "rules", "Be nice.").await;
    create(&storage, "faq", "See the docs").await;
    alias(&storage, "r", "rules").await.unwrap();

    // Alias name taken by a tag
    assert!(matches!(
        alias(&storage, "faq", "rules").await,
        Err(TagError::AlreadyExists(_))
    ));

    // Alias name taken by another alias
    assert!(matches!(
        alias(&storage, "r", "faq").await,
        Err(TagError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn test_create_alias_for_missing_tag_fails() {
    let (storage, _dir) = create_test_storage().await;

    let result = alias(&storage, "r", "rules").await;

    assert!(matches!(result, Err(TagError::NotFound(n)) if n == "rules"));
    assert!(!storage.aliases().name_in_use(&name("r")).await.unwrap());
}

#[tokio::test]
async fn test_alias_of_alias_points_at_tag() {
    let (storage, _dir) = create_test_storage().await;
    let rules = create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let second = alias(&storage, "server_rules", "r").await.unwrap();

    assert_eq!(second.tag_id, rules.id);
}

#[tokio::test]
async fn test_all_aliases_resolve_to_the_same_tag() {
    let (storage, _dir) = create_test_storage().await;
    let rules = create(&storage, "rules", "Be nice.").await;

    let alias_names = ["r", "regles", "server-rules", "conduct"];
    for alias_name in alias_names {
        alias(&storage, alias_name, "rules").await.unwrap();
    }

    assert_eq!(storage.resolve(&name("rules")).await.unwrap().id, rules.id);
    for alias_name in alias_names {
        let resolved = storage.resolve(&name(alias_name)).await.unwrap();
        assert_eq!(
            resolved.id, rules.id,
            "alias {} resolved elsewhere",
            alias_name
        );
    }

    let aliases = storage.aliases().aliases_for(&rules.id).await.unwrap();
    let mut listed: Vec<_> = aliases.iter().map(|a| a.name.as_str()).collect();
    listed.sort_unstable();
    assert_eq!(listed, vec!["conduct", "r", "regles", "server-rules"]);
}

#[tokio::test]
async fn test_resolve_unknown_name() {
    let (storage, _dir) = create_test_storage().await;

    let result = storage.resolve(&name("nothing")).await;
    assert!(matches!(result, Err(TagError::NotFound(n)) if n == "nothing"));
}

#[tokio::test]
async fn test_lookup_counts_uses_only_when_asked() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let tag = storage.lookup(&name("rules"), true).await.unwrap();
    assert_eq!(tag.uses, 1);

    // Lookups through an alias count towards the tag
    let tag = storage.lookup(&name("r"), true).await.unwrap();
    assert_eq!(tag.uses, 2);

    let tag = storage.lookup(&name("rules"), false).await.unwrap();
    assert_eq!(tag.uses, 2);
    assert_eq!(tag.revisions, 0);
}

#[tokio::test]
async fn test_concurrent_lookups_do_not_lose_uses() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "popular", "Everyone reads this").await;

    const LOOKUPS: i64 = 40;

    let mut handles = Vec::new();
    for _ in 0..LOOKUPS {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move { storage.lookup(&name("popular"), true).await }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let tag = storage.lookup(&name("popular"), false).await.unwrap();
    assert_eq!(tag.uses, LOOKUPS);
}

#[tokio::test]
async fn test_concurrent_creates_of_the_same_name() {
    let (storage, _dir) = create_test_storage().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .create_tag(TagCreateInput {
                    name: name("contested"),
                    content: format!("version {}", i),
                    owner_id: moderator(),
                })
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(TagError::AlreadyExists(n)) => assert_eq!(n, "contested"),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(storage.count_tags().await.unwrap(), 1);
}

#[tokio::test]
async fn test_tag_and_alias_race_for_the_same_name() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "rules", "Be nice.").await;

    for round in 0..10 {
        let contested = format!("contested{}", round);

        let mut handles = Vec::new();
        for i in 0..3 {
            let storage = storage.clone();
            let tag_name = contested.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .create_tag(TagCreateInput {
                        name: name(&tag_name),
                        content: format!("version {}", i),
                        owner_id: moderator(),
                    })
                    .await
                    .map(|_| ())
            }));
        }
        for _ in 0..3 {
            let storage = storage.clone();
            let alias_name = contested.clone();
            handles.push(tokio::spawn(async move {
                alias(&storage, &alias_name, "rules").await.map(|_| ())
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => winners += 1,
                Err(TagError::AlreadyExists(n)) => assert_eq!(n, contested),
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(winners, 1, "round {}", round);
        let taken = storage.aliases().name_in_use(&name(&contested)).await;
        assert!(taken.unwrap());
    }
}

#[tokio::test]
async fn test_edit_counts_revisions_and_keeps_uses() {
    let (storage, _dir) = create_test_storage().await;
    let created = create(&storage, "faq", "Old answer").await;
    storage.lookup(&name("faq"), true).await.unwrap();

    let edited = storage.edit_tag(&name("faq"), "New answer").await.unwrap();
    assert_eq!(edited.content, "New answer");
    assert_eq!(edited.revisions, 1);
    assert_eq!(edited.uses, 1);
    assert!(edited.updated_at >= created.updated_at);

    let edited = storage
        .edit_tag(&name("faq"), "Newer answer")
        .await
        .unwrap();
    assert_eq!(edited.revisions, 2);
    assert_eq!(edited.uses, 1);
}

#[tokio::test]
async fn test_edit_through_alias_edits_tag() {
    let (storage, _dir) = create_test_storage().await;
    let rules = create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let edited = storage.edit_tag(&name("r"), "Be very nice.").await.unwrap();

    assert_eq!(edited.id, rules.id);
    assert_eq!(edited.name, "rules");
    assert_eq!(edited.content, "Be very nice.");
}

#[tokio::test]
async fn test_edit_missing_tag_fails() {
    let (storage, _dir) = create_test_storage().await;

    let result = storage.edit_tag(&name("ghost"), "content").await;
    assert!(matches!(result, Err(TagError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_tag_cascades_to_aliases() {
    let (storage, _dir) = create_test_storage().await;
    let rules = create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    assert_eq!(storage.resolve(&name("r")).await.unwrap().id, rules.id);

    let deleted = storage.delete_tag(&name("rules")).await.unwrap();
    assert_eq!(deleted.id, rules.id);
    assert_eq!(deleted.content, "Be nice.");

    assert!(matches!(
        storage.resolve(&name("r")).await,
        Err(TagError::NotFound(_))
    ));
    assert!(matches!(
        storage.resolve(&name("rules")).await,
        Err(TagError::NotFound(_))
    ));
    assert!(storage.get_tag(&rules.id).await.unwrap().is_none());

    // Both names are free again
    create(&storage, "rules", "Fresh start").await;
    create(&storage, "r", "Now a tag").await;
}

#[tokio::test]
async fn test_delete_missing_tag_fails() {
    let (storage, _dir) = create_test_storage().await;

    let result = storage.delete_tag(&name("ghost")).await;
    assert!(matches!(result, Err(TagError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_alias_keeps_tag() {
    let (storage, _dir) = create_test_storage().await;
    let rules = create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let removed = storage.aliases().delete_alias(&name("r")).await.unwrap();
    assert_eq!(removed.tag_id, rules.id);

    let alias_left = storage.aliases().get_alias(&name("r")).await.unwrap();
    assert!(alias_left.is_none());
    assert!(matches!(
        storage.resolve(&name("r")).await,
        Err(TagError::NotFound(_))
    ));
    assert_eq!(storage.resolve(&name("rules")).await.unwrap().id, rules.id);

    // The alias name can be reused
    alias(&storage, "r", "rules").await.unwrap();
}

#[tokio::test]
async fn test_delete_alias_does_not_delete_tags() {
    let (storage, _dir) = create_test_storage().await;
    create(&storage, "rules", "Be nice.").await;

    let result = storage.aliases().delete_alias(&name("rules")).await;

    assert!(matches!(result, Err(TagError::NotFound(_))));
    assert_eq!(storage.count_tags().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_by_popularity() {
    let (storage, _dir) = create_test_storage().await;
    for (tag_name, uses) in [("quiet", 0), ("loud", 5), ("medium", 2), ("also_medium", 2)] {
        create(&storage, tag_name, "content").await;
        for _ in 0..uses {
            storage.lookup(&name(tag_name), true).await.unwrap();
        }
    }

    let tags = storage.list_by_popularity().await.unwrap();

    assert!(tags.windows(2).all(|pair| pair[0].uses >= pair[1].uses));
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["loud", "also_medium", "medium", "quiet"]);
}

#[tokio::test]
async fn test_list_tags_paginated() {
    let (storage, _dir) = create_test_storage().await;
    for i in 0..5 {
        create(&storage, &format!("tag{}", i), "content").await;
    }

    let (page1, total) = storage.list_tags_paginated(Some(2), Some(0)).await.unwrap();
    assert_eq!(page1.len(), 2);
    assert_eq!(total, 5);

    let (page3, _) = storage.list_tags_paginated(Some(2), Some(4)).await.unwrap();
    assert_eq!(page3.len(), 1);

    assert_ne!(page1[0].id, page3[0].id);
}

#[tokio::test]
async fn test_rules_alias_scenario() {
    let (storage, _dir) = create_test_storage().await;

    let rules = create(&storage, "rules", "Be nice.").await;
    alias(&storage, "r", "rules").await.unwrap();

    let resolved = storage.resolve(&name("r")).await.unwrap();
    assert_eq!(resolved.id, rules.id);
    assert_eq!(resolved.content, "Be nice.");

    storage.delete_tag(&name("rules")).await.unwrap();
    assert!(matches!(
        storage.resolve(&name("r")).await,
        Err(TagError::NotFound(_))
    ));
}
