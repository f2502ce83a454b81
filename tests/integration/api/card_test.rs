//! Card API integration tests
//!
//! Create/update/delete through `/boards/{id}/cards` and `/cards/{id}`,
//! partial updates, kind rules, image uploads and blob cleanup.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{FailingDeleteStorage, FailingPutStorage, TestApp, STORAGE_URL};

fn image_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(b"GIF89a".to_vec())
            .file_name("drawing.gif")
            .mime_type("image/gif"),
    )
}

async fn get_card(app: &TestApp, token: &str, board_id: i64, card_id: i64) -> Value {
    let cards: Value = app
        .server
        .get(&format!("/boards/{}/cards", board_id))
        .authorization_bearer(token)
        .await
        .json();
    cards
        .as_array()
        .unwrap()
        .iter()
        .find(|card| card["id"] == card_id)
        .cloned()
        .expect("card listed")
}

#[tokio::test]
async fn test_create_text_card_defaults_kind() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let card = app
        .create_card(&ann, board_id, json!({ "text": "hi", "position_x": 0, "position_y": 0 }))
        .await;

    assert_eq!(card["kind"], "text");
    assert_eq!(card["text"], "hi");
    assert_eq!(card["board_id"], board_id);
    assert!(card.get("image_url").is_none());
}

#[tokio::test]
async fn test_image_card_without_url_is_rejected_and_not_stored() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .post(&format!("/boards/{}/cards", board_id))
        .authorization_bearer(&ann.token)
        .json(&json!({ "kind": "image", "width": 10 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count_rows("cards", board_id).await, 0);
}

#[tokio::test]
async fn test_unknown_kind_is_rejected() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .post(&format!("/boards/{}/cards", board_id))
        .authorization_bearer(&ann.token)
        .json(&json!({ "kind": "video" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid kind (must be 'text' or 'image')");
}

#[tokio::test]
async fn test_empty_update_leaves_card_identical() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    let card = app
        .create_card(
            &ann,
            board_id,
            json!({
                "kind": "image",
                "image_url": format!("{}/images/{}/a.png", STORAGE_URL, board_id),
                "width": 320.5,
                "height": 200,
                "position_x": -12.25,
                "position_y": 40
            }),
        )
        .await;
    let card_id = card["id"].as_i64().unwrap();
    let before = get_card(&app, &ann.token, board_id, card_id).await;

    let response = app
        .server
        .put(&format!("/cards/{}", card_id))
        .authorization_bearer(&ann.token)
        .json(&json!({}))
        .await;
    assert_eq!(response.json::<Value>(), json!({ "status": "updated" }));

    let after = get_card(&app, &ann.token, board_id, card_id).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_partial_update_keeps_omitted_fields() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    let card = app
        .create_card(
            &ann,
            board_id,
            json!({
                "kind": "image",
                "image_url": "https://cdn.example.com/images/1/x.png",
                "width": 300,
                "height": 150,
                "position_x": 5,
                "position_y": 6
            }),
        )
        .await;
    let card_id = card["id"].as_i64().unwrap();

    app.server
        .put(&format!("/cards/{}", card_id))
        .authorization_bearer(&ann.token)
        .json(&json!({ "width": 600, "position_y": 60 }))
        .await
        .assert_status_ok();

    let after = get_card(&app, &ann.token, board_id, card_id).await;
    assert_eq!(after["width"], 600.0);
    assert_eq!(after["height"], 150.0);
    assert_eq!(after["position_x"], 5.0);
    assert_eq!(after["position_y"], 60.0);
    assert_eq!(after["image_url"], "https://cdn.example.com/images/1/x.png");
}

#[tokio::test]
async fn test_update_cannot_change_kind() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    let card = app.create_card(&ann, board_id, json!({ "text": "hi" })).await;

    let response = app
        .server
        .put(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&ann.token)
        .json(&json!({ "kind": "image", "text": "changed" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let after = get_card(&app, &ann.token, board_id, card["id"].as_i64().unwrap()).await;
    assert_eq!(after["text"], "hi");
}

#[tokio::test]
async fn test_legacy_empty_kind_row_updates_as_text() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    let card = app.create_card(&ann, board_id, json!({ "text": "old" })).await;
    let card_id = card["id"].as_i64().unwrap();

    sqlx::query("UPDATE cards SET kind = '' WHERE id = ?")
        .bind(card_id)
        .execute(&app.state.db)
        .await
        .unwrap();

    app.server
        .put(&format!("/cards/{}", card_id))
        .authorization_bearer(&ann.token)
        .json(&json!({ "kind": "text", "text": "new" }))
        .await
        .assert_status_ok();

    let after = get_card(&app, &ann.token, board_id, card_id).await;
    assert_eq!(after["kind"], "text");
    assert_eq!(after["text"], "new");
}

#[tokio::test]
async fn test_missing_card_is_404() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;

    let response = app
        .server
        .put("/cards/4242")
        .authorization_bearer(&ann.token)
        .json(&json!({ "text": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.server.delete("/cards/4242").authorization_bearer(&ann.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_grant_can_list_but_not_mutate() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    let card = app.create_card(&ann, board_id, json!({ "text": "hi" })).await;
    app.grant(&ann, board_id, bob.user_id, "read").await;

    let list = app
        .server
        .get(&format!("/boards/{}/cards", board_id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);

    let create = app
        .server
        .post(&format!("/boards/{}/cards", board_id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "text": "mine" }))
        .await;
    let update = app
        .server
        .put(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&bob.token)
        .json(&json!({ "text": "mine" }))
        .await;
    let delete = app
        .server
        .delete(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&bob.token)
        .await;

    assert_eq!(create.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(update.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_edit_grant_can_mutate_cards() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    app.grant(&ann, board_id, bob.user_id, "edit").await;

    let card = app.create_card(&bob, board_id, json!({ "text": "from bob" })).await;

    let response = app
        .server
        .delete(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.json::<Value>(), json!({ "status": "deleted" }));
}

#[tokio::test]
async fn test_image_upload_then_card_then_delete_removes_blob() {
    let (app, storage) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let upload = app
        .server
        .post(&format!("/boards/{}/images", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form())
        .await;
    assert_eq!(upload.status_code(), StatusCode::OK);
    let url = upload.json::<Value>()["url"].as_str().unwrap().to_string();

    let prefix = format!("{}/images/{}/", STORAGE_URL, board_id);
    assert!(url.starts_with(&prefix), "{}", url);
    assert!(url.ends_with(".gif"));
    assert_eq!(storage.keys().await.len(), 1);
    assert_eq!(app.count_rows("cards", board_id).await, 0);

    let card = app
        .create_card(&ann, board_id, json!({ "kind": "image", "image_url": url }))
        .await;

    app.server
        .delete(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&ann.token)
        .await
        .assert_status_ok();

    assert!(storage.keys().await.is_empty());
}

#[tokio::test]
async fn test_failing_blob_cleanup_does_not_fail_card_delete() {
    let storage = FailingDeleteStorage::new(STORAGE_URL);
    let app = TestApp::with_storage(Arc::new(storage.clone())).await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let url = app
        .server
        .post(&format!("/boards/{}/images", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form())
        .await
        .json::<Value>()["url"]
        .as_str()
        .unwrap()
        .to_string();
    let card = app
        .create_card(&ann, board_id, json!({ "kind": "image", "image_url": url }))
        .await;

    let response = app
        .server
        .delete(&format!("/cards/{}", card["id"]))
        .authorization_bearer(&ann.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "deleted" }));
    assert_eq!(app.count_rows("cards", board_id).await, 0);
    assert_eq!(storage.inner.keys().await.len(), 1);
}

#[tokio::test]
async fn test_failing_upload_is_500_with_generic_message() {
    let app = TestApp::with_storage(Arc::new(FailingPutStorage)).await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .post(&format!("/boards/{}/images", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_clearing_thumbnail_surfaces_blob_delete_failure() {
    let app = TestApp::with_storage(Arc::new(FailingDeleteStorage::new(STORAGE_URL))).await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    app.server
        .post(&format!("/boards/{}/thumbnail", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form())
        .await
        .assert_status_ok();

    let response = app
        .server
        .delete(&format!("/boards/{}/thumbnail", board_id))
        .authorization_bearer(&ann.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
