// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Category lifecycle workflow tests.

use plancal_core::Id;

use crate::common::{new_planner, setup_temp_dirs, test_config, test_content_draft};

#[tokio::test]
async fn category_lifecycle_create_rename_delete() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;

    // Act
    let category = planner.new_category("  Cooking ").await.unwrap();
    let short_id = Id::ShortIdOrUid(category.short_id.unwrap().to_string());
    let renamed = planner.rename_category(&short_id, "Baking").await.unwrap();

    // Assert
    assert_eq!(category.name, "Cooking");
    assert_eq!(renamed.id, category.id);
    assert_eq!(renamed.name, "Baking");

    let deleted = planner.delete_category(&short_id).await.unwrap();
    assert_eq!(deleted.id, category.id);
    assert!(planner.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn category_lifecycle_rejects_empty_name() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;

    assert!(planner.new_category("   ").await.is_err());
    assert!(planner.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn category_lifecycle_delete_refused_while_in_use() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let item = planner
        .new_content(test_content_draft(&category.id, "Pasta"))
        .await
        .unwrap();

    // Act
    let err = planner
        .delete_category(&Id::Uid(category.id.clone()))
        .await
        .unwrap_err();

    // Assert
    assert!(err.to_string().contains("still has 1 content item"));
    assert_eq!(planner.list_categories().await.unwrap().len(), 1);

    // Deleting the item frees the category
    planner.delete_content(&Id::Uid(item.id)).await.unwrap();
    planner
        .delete_category(&Id::Uid(category.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn category_lifecycle_categories_persist_across_planners() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    for name in ["Travel", "Baking"] {
        planner.new_category(name).await.unwrap();
    }
    planner.close().await.unwrap();

    // Act
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let categories = planner.list_categories().await.unwrap();

    // Assert
    let names: Vec<_> = categories.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Baking", "Travel"]);
    assert!(categories.iter().all(|a| a.short_id.is_some()));
}
