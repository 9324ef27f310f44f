// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Drag-and-drop scheduling workflow tests.
//!
//! Today is pinned to 2026-10-19 by the fixtures.

use jiff::civil::date;
use plancal_core::{ContentItem, DropTarget, Id, Planner, ScheduleError};

use crate::common::{
    TODAY, assert_names, new_planner, setup_temp_dirs, test_config, test_content_draft,
};

async fn planner_with_item(state_dir: &std::path::Path, timeline_days: u32) -> (Planner, ContentItem) {
    let planner = new_planner(test_config(state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();
    let mut draft = test_content_draft(&category.id, "Pasta");
    draft.timeline_days = timeline_days;
    let item = planner.new_content(draft).await.unwrap();
    (planner, item)
}

#[tokio::test]
async fn scheduling_drop_on_future_day() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 2).await;

    // Act - two days of preparation starting today
    let scheduled = planner
        .schedule(&Id::Uid(item.id.clone()), date(2026, 10, 21))
        .await
        .unwrap();

    // Assert
    assert_eq!(scheduled.scheduled_date, Some(date(2026, 10, 21)));
    assert!(planner.backlog(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn scheduling_refuses_past_day() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 1).await;

    // Act
    let err = planner
        .schedule(&Id::Uid(item.id.clone()), date(2026, 10, 18))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(
        err.downcast_ref::<ScheduleError>(),
        Some(&ScheduleError::PastDate {
            date: date(2026, 10, 18)
        })
    );
    assert!(err.to_string().contains("cannot schedule on a past day"));
    let unchanged = planner.get_content(&Id::Uid(item.id)).await.unwrap();
    assert!(!unchanged.is_scheduled());
}

#[tokio::test]
async fn scheduling_refuses_timeline_starting_before_today() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 3).await;

    // Act
    let err = planner
        .drop_item(&Id::Uid(item.id.clone()), DropTarget::Day(date(2026, 10, 21)))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(
        err.downcast_ref::<ScheduleError>(),
        Some(&ScheduleError::TimelineStartsInPast {
            date: date(2026, 10, 21),
            timeline_days: 3,
            starts: date(2026, 10, 18),
        })
    );
    assert!(
        err.to_string()
            .contains("this content would need work to start before today")
    );
}

#[tokio::test]
async fn scheduling_today_always_needs_earlier_preparation() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 1).await;

    let err = planner
        .schedule(&Id::Uid(item.id), TODAY)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScheduleError>(),
        Some(ScheduleError::TimelineStartsInPast { .. })
    ));
}

#[tokio::test]
async fn scheduling_drop_on_backlog_clears_date() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 1).await;
    let id = Id::ShortIdOrUid(item.short_id.unwrap().to_string());
    planner.schedule(&id, date(2026, 10, 30)).await.unwrap();

    // Act
    let unscheduled = planner.unschedule(&id).await.unwrap();

    // Assert
    assert_eq!(unscheduled.scheduled_date, None);
    assert_names(&planner.backlog(None).await.unwrap(), &["Pasta"]);
}

#[tokio::test]
async fn scheduling_backlog_drop_of_unscheduled_item_is_noop() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let (planner, item) = planner_with_item(&temp_dirs.state_dir, 1).await;

    // Act
    let same = planner
        .drop_item(&Id::Uid(item.id.clone()), DropTarget::Backlog)
        .await
        .unwrap();

    // Assert
    assert_eq!(same, item);
}

#[tokio::test]
async fn scheduling_backlog_filters_by_category() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let cooking = planner.new_category("Cooking").await.unwrap();
    let travel = planner.new_category("Travel").await.unwrap();
    for (category, name) in [(&cooking, "Soup"), (&travel, "Alps"), (&cooking, "Bread")] {
        planner
            .new_content(test_content_draft(&category.id, name))
            .await
            .unwrap();
    }

    // Act
    let cooking_id = Id::ShortIdOrUid(cooking.short_id.unwrap().to_string());
    let backlog = planner.backlog(Some(&cooking_id)).await.unwrap();

    // Assert
    assert_names(&backlog, &["Soup", "Bread"]);
    assert_eq!(planner.backlog(None).await.unwrap().len(), 3);
}
