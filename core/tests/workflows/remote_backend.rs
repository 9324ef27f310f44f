// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Workflow tests against a mocked hosted backend.
//!
//! Data lives on the server while short ids stay in the local state directory.

use std::path::Path;

use jiff::civil::date;
use plancal_core::{BackendConfig, Config, Id, RestConfig, ScheduleError, YearMonth};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{new_planner, setup_temp_dirs};

fn remote_config(server: &MockServer, state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        backend: BackendConfig::Remote(RestConfig {
            base_url: format!("{}/", server.uri()),
            api_key: "anon-key".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn item_json(scheduled: Option<&str>) -> serde_json::Value {
    json!({
        "id": "x1",
        "category_id": "c1",
        "name": "Pasta",
        "raw_file_urls": [],
        "inspo_urls": [],
        "final_url": null,
        "stage": "Script",
        "social": "IG",
        "timeline_days": 2,
        "scheduled_date": scheduled,
        "created_at": "2026-10-01T08:00:00+00:00",
        "updated_at": "2026-10-01T08:00:00+00:00",
        "category": { "id": "c1", "name": "Cooking", "created_at": "2026-10-01T08:00:00+00:00" }
    })
}

async fn mount_get_item(server: &MockServer, scheduled: Option<&str>) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/content_items"))
        .and(query_param("id", "eq.x1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item_json(scheduled)])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn remote_backend_schedules_with_patch() {
    // Arrange
    let server = MockServer::start().await;
    let temp_dirs = setup_temp_dirs().await.unwrap();
    mount_get_item(&server, None).await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/content_items"))
        .and(query_param("id", "eq.x1"))
        .and(header("apikey", "anon-key"))
        .and(body_partial_json(json!({ "scheduled_date": "2026-10-25" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([item_json(Some("2026-10-25"))])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let planner = new_planner(remote_config(&server, &temp_dirs.state_dir)).await;

    // Act
    let item = planner
        .schedule(&Id::Uid("x1".to_string()), date(2026, 10, 25))
        .await
        .unwrap();

    // Assert
    assert_eq!(item.scheduled_date, Some(date(2026, 10, 25)));
    assert_eq!(item.short_id.map(|a| a.get()), Some(1));
    assert!(temp_dirs.state_dir.join("plancal.db").exists());
}

#[tokio::test]
async fn remote_backend_refused_drop_sends_nothing() {
    // Arrange
    let server = MockServer::start().await;
    let temp_dirs = setup_temp_dirs().await.unwrap();
    mount_get_item(&server, None).await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let planner = new_planner(remote_config(&server, &temp_dirs.state_dir)).await;

    // Act
    let err = planner
        .schedule(&Id::Uid("x1".to_string()), date(2026, 10, 20))
        .await
        .unwrap_err();

    // Assert
    assert!(err.downcast_ref::<ScheduleError>().is_some());
}

#[tokio::test]
async fn remote_backend_month_view_and_backlog() {
    // Arrange
    let server = MockServer::start().await;
    let temp_dirs = setup_temp_dirs().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/rest/v1/content_items"))
        .and(query_param("scheduled_date", "gte.2026-10-01"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([item_json(Some("2026-10-25"))])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/content_items"))
        .and(query_param("scheduled_date", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let planner = new_planner(remote_config(&server, &temp_dirs.state_dir)).await;

    // Act
    let view = planner
        .month_view(YearMonth::new(2026, 10).unwrap(), None)
        .await
        .unwrap();
    let backlog = planner.backlog(None).await.unwrap();

    // Assert
    let day = view.days().find(|a| a.date == date(2026, 10, 25)).unwrap();
    assert_eq!(day.items.len(), 1);
    assert_eq!(day.items[0].name, "Pasta");
    assert!(backlog.is_empty());
}

#[tokio::test]
async fn remote_backend_delete_category_refused_when_used() {
    // Arrange
    let server = MockServer::start().await;
    let temp_dirs = setup_temp_dirs().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", "eq.c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c1", "name": "Cooking", "created_at": "2026-10-01T08:00:00+00:00" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/content_items"))
        .and(query_param("category_id", "eq.c1"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-1/2"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let planner = new_planner(remote_config(&server, &temp_dirs.state_dir)).await;

    // Act
    let err = planner
        .delete_category(&Id::Uid("c1".to_string()))
        .await
        .unwrap_err();

    // Assert
    assert!(err.to_string().contains("still has 2 content item"));
}

#[tokio::test]
async fn remote_backend_unknown_number_is_not_found() {
    // Arrange
    let server = MockServer::start().await;
    let temp_dirs = setup_temp_dirs().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "22P02",
            "message": "invalid input syntax for type uuid: \"42\""
        })))
        .mount(&server)
        .await;
    let planner = new_planner(remote_config(&server, &temp_dirs.state_dir)).await;

    // Act
    let err = planner
        .get_category(&Id::ShortIdOrUid("42".to_string()))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.to_string(), "Category not found: 42");
}
