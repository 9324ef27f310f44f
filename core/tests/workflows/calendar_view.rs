// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Month calendar workflow tests.
//!
//! October 2026 starts on a Thursday; today is pinned to 2026-10-19.

use jiff::civil::{Date, date};
use plancal_core::{Config, DayCell, Id, MonthView, TimelinePhase, WeekStart, YearMonth};

use crate::common::{TODAY, new_planner, setup_temp_dirs, test_config, test_content_draft};

fn cell(view: &MonthView, date: Date) -> &DayCell {
    view.days()
        .find(|a| a.date == date)
        .expect("day should be in the month")
}

fn phases(cell: &DayCell) -> Vec<(&str, TimelinePhase)> {
    cell.timelines
        .iter()
        .map(|a| (a.item.name.as_str(), a.phase))
        .collect()
}

#[tokio::test]
async fn calendar_view_places_items_and_timelines() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let category = planner.new_category("Cooking").await.unwrap();

    let pasta = planner
        .new_content(test_content_draft(&category.id, "Pasta"))
        .await
        .unwrap();
    planner
        .schedule(&Id::Uid(pasta.id), date(2026, 10, 25))
        .await
        .unwrap();

    // Scheduled next month, preparation reaches back into October
    let mut draft = test_content_draft(&category.id, "Feast");
    draft.timeline_days = 5;
    let feast = planner.new_content(draft).await.unwrap();
    planner
        .schedule(&Id::Uid(feast.id), date(2026, 11, 2))
        .await
        .unwrap();

    // Act
    let view = planner
        .month_view(YearMonth::new(2026, 10).unwrap(), None)
        .await
        .unwrap();

    // Assert - grid shape
    assert_eq!(view.week_start, WeekStart::Sunday);
    assert_eq!(view.days().count(), 31);
    assert!(view.weeks[0][..4].iter().all(Option::is_none));
    assert_eq!(view.weeks[0][4].as_ref().unwrap().date, date(2026, 10, 1));

    // Assert - items and timelines
    let publish = cell(&view, date(2026, 10, 25));
    assert_eq!(publish.items.len(), 1);
    assert_eq!(phases(publish), vec![("Pasta", TimelinePhase::Publish)]);
    assert_eq!(
        phases(cell(&view, date(2026, 10, 23))),
        vec![("Pasta", TimelinePhase::Preparation)]
    );
    assert!(cell(&view, date(2026, 10, 22)).timelines.is_empty());
    assert_eq!(
        phases(cell(&view, date(2026, 10, 28))),
        vec![("Feast", TimelinePhase::Preparation)]
    );
    assert!(cell(&view, date(2026, 10, 28)).items.is_empty());

    // Assert - today and past days
    assert!(cell(&view, TODAY).is_today);
    assert!(!cell(&view, TODAY).is_past);
    assert!(cell(&view, date(2026, 10, 18)).is_past);
}

#[tokio::test]
async fn calendar_view_monday_weeks_and_category_filter() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        week_start: WeekStart::Monday,
        ..test_config(&temp_dirs.state_dir)
    };
    let planner = new_planner(config).await;
    let cooking = planner.new_category("Cooking").await.unwrap();
    let travel = planner.new_category("Travel").await.unwrap();
    for (category, name, day) in [(&cooking, "Soup", 24), (&travel, "Alps", 24)] {
        let item = planner
            .new_content(test_content_draft(&category.id, name))
            .await
            .unwrap();
        planner
            .schedule(&Id::Uid(item.id), date(2026, 10, day))
            .await
            .unwrap();
    }

    // Act
    let view = planner
        .month_view(
            YearMonth::new(2026, 10).unwrap(),
            Some(&Id::Uid(travel.id.clone())),
        )
        .await
        .unwrap();

    // Assert
    assert!(view.weeks[0][..3].iter().all(Option::is_none));
    assert_eq!(view.weeks[0][3].as_ref().unwrap().date, date(2026, 10, 1));
    let names: Vec<_> = cell(&view, date(2026, 10, 24))
        .items
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alps"]);
}

#[tokio::test]
async fn calendar_view_snapshot_loads_everything() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let planner = new_planner(test_config(&temp_dirs.state_dir)).await;
    let cooking = planner.new_category("Cooking").await.unwrap();
    planner.new_category("Baking").await.unwrap();
    planner
        .new_content(test_content_draft(&cooking.id, "Soup"))
        .await
        .unwrap();

    // Act
    let snapshot = planner.snapshot(None).await.unwrap();

    // Assert
    let names: Vec<_> = snapshot.categories.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Baking", "Cooking"]);
    assert_eq!(snapshot.contents.len(), 1);
    assert_eq!(
        snapshot.contents[0].category.as_ref().unwrap().name,
        "Cooking"
    );
}
