// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content item lifecycle workflow tests.

use plancal_core::{
    Config, ContentConditions, ContentPatch, ContentSortKey, Id, Platform, SortOrder, Stage,
};

use crate::common::{
    assert_content_matches_draft, assert_names, new_planner, setup_temp_dirs, test_config,
    test_content_draft,
};

#[tokio::test]
async fn content_lifecycle_create_with_config_defaults() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        default_timeline_days: 5,
        default_platform: Platform::Podcast,
        ..test_config(&temp_dirs.state_dir)
    };
    let planner = new_planner(config).await;
    let category = planner.new_category("Interviews").await.unwrap();

    // Act
    let mut draft = planner.default_content_draft();
    draft.category_id = category.short_id.unwrap().to_string();
    draft.name = "Episode 1".to_string();
    let item = planner.new_content(draft).await.unwrap();

    // Assert
    assert_eq!(item.category_id, category.id);
    assert_eq!(item.timeline_days, 5);
    assert_eq!(item.social, Platform::Podcast);
    assert_eq!(item.stage, Stage::Idea);
    assert!(!item.is_scheduled());
    assert_eq!(item.category.unwrap().name, "Interviews");
}

#[tokio::test]
async fn content_lifecycle_requires_existing_category() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;

    let err = planner
        .new_content(test_content_draft("no-such-category", "Orphan"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Category not found"));
}

#[tokio::test]
async fn content_lifecycle_edit_and_advance_to_posted() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let mut draft = test_content_draft(&category.id, "Pasta");
    draft.raw_file_urls = vec![" https://raw.test/1 ".to_string(), String::new()];
    let item = planner.new_content(draft).await.unwrap();
    let id = Id::ShortIdOrUid(item.short_id.unwrap().to_string());
    assert_eq!(item.raw_file_urls, vec!["https://raw.test/1".to_string()]);

    // Act - edit fields
    let patch = ContentPatch {
        name: Some("Fresh Pasta".to_string()),
        final_url: Some(Some("https://final.test".to_string())),
        timeline_days: Some(4),
        ..Default::default()
    };
    let edited = planner.update_content(&id, patch).await.unwrap();
    assert_eq!(edited.name, "Fresh Pasta");
    assert_eq!(edited.final_url.as_deref(), Some("https://final.test"));
    assert_eq!(edited.timeline_days, 4);
    assert_eq!(edited.short_id, item.short_id);

    // Act - walk through every stage
    let mut stages = vec![edited.stage];
    loop {
        match planner.advance_stage(&id).await {
            Ok(advanced) => stages.push(advanced.stage),
            Err(err) => {
                assert!(err.to_string().contains("already Posted"));
                break;
            }
        }
    }

    // Assert
    assert_eq!(stages, Stage::ALL);
}

#[tokio::test]
async fn content_lifecycle_rejects_invalid_patch() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let item = planner
        .new_content(test_content_draft(&category.id, "Pasta"))
        .await
        .unwrap();

    let patch = ContentPatch {
        timeline_days: Some(0),
        ..Default::default()
    };
    assert!(planner.update_content(&Id::Uid(item.id), patch).await.is_err());
}

#[tokio::test]
async fn content_lifecycle_move_between_categories() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let cooking = planner.new_category("Cooking").await.unwrap();
    let travel = planner.new_category("Travel").await.unwrap();
    let item = planner
        .new_content(test_content_draft(&cooking.id, "Street food"))
        .await
        .unwrap();

    // Act
    let patch = ContentPatch {
        category_id: Some(travel.short_id.unwrap().to_string()),
        ..Default::default()
    };
    let moved = planner
        .update_content(&Id::Uid(item.id.clone()), patch)
        .await
        .unwrap();

    // Assert
    assert_eq!(moved.category_id, travel.id);
    assert_eq!(moved.category.unwrap().name, "Travel");
}

#[tokio::test]
async fn content_lifecycle_list_and_delete() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let mut drafts = vec![];
    for name in ["Soup", "Bread", "Curry"] {
        let draft = test_content_draft(&category.id, name);
        let item = planner.new_content(draft.clone()).await.unwrap();
        assert_content_matches_draft(&item, &draft);
        drafts.push(item);
    }

    // Act
    let sorted = planner
        .list_contents(
            &ContentConditions::default(),
            &[(ContentSortKey::Name, SortOrder::Asc).into()],
            None,
        )
        .await
        .unwrap();
    let deleted = planner
        .delete_content(&Id::Uid(drafts[0].id.clone()))
        .await
        .unwrap();

    // Assert
    assert_names(&sorted, &["Bread", "Curry", "Soup"]);
    assert_eq!(deleted.name, "Soup");
    assert_eq!(
        planner
            .count_contents(&ContentConditions::default())
            .await
            .unwrap(),
        2
    );
    assert!(planner.get_content(&Id::Uid(deleted.id)).await.is_err());
}

#[tokio::test]
async fn content_lifecycle_short_ids_survive_restart_until_flushed() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let item = planner
        .new_content(test_content_draft(&category.id, "Pasta"))
        .await
        .unwrap();
    let short_id = item.short_id.unwrap();
    planner.close().await.unwrap();

    // Act
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let found = planner
        .get_content(&Id::ShortIdOrUid(short_id.to_string()))
        .await
        .unwrap();

    // Assert
    assert_eq!(found.id, item.id);

    // Short ids of the wrong kind are refused
    let category_short = category.short_id.unwrap().to_string();
    assert!(
        planner
            .get_content(&Id::ShortIdOrUid(category_short))
            .await
            .is_err()
    );

    assert_eq!(planner.flush_short_ids().await.unwrap(), 2);
    let renumbered = planner.get_content(&Id::Uid(item.id)).await.unwrap();
    assert_eq!(renumbered.short_id.map(|a| a.get()), Some(1));
}
