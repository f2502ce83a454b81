//! Board API integration tests
//!
//! CRUD, the legacy body-id forms, thumbnails and the delete cascade.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{TestApp, STORAGE_URL};

fn image_form(file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(b"\x89PNG fake".to_vec())
            .file_name(file_name)
            .mime_type("image/png"),
    )
}

#[tokio::test]
async fn test_create_and_list_boards() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;

    let response = app
        .server
        .post("/boards")
        .authorization_bearer(&ann.token)
        .json(&json!({ "title": "  Plan  " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let board: Value = response.json();
    assert_eq!(board["title"], "Plan");
    assert_eq!(board["owner_id"], ann.user_id);

    let second = app.create_board(&ann, "Later").await;

    let list: Value = app.server.get("/boards").authorization_bearer(&ann.token).await.json();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], second);
    assert_eq!(list[0]["permission"], "owner");
    assert_eq!(list[0]["is_owner"], true);
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;

    let response = app
        .server
        .post("/boards")
        .authorization_bearer(&ann.token)
        .json(&json!({ "title": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "title is required");
}

#[tokio::test]
async fn test_board_detail_embeds_cards_and_permission() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    app.create_card(&ann, board_id, json!({ "text": "hi" })).await;

    let detail: Value = app
        .server
        .get(&format!("/boards/{}", board_id))
        .authorization_bearer(&ann.token)
        .await
        .json();

    assert_eq!(detail["title"], "Plan");
    assert_eq!(detail["permission"], "owner");
    assert_eq!(detail["thumbnail_url"], Value::Null);
    assert_eq!(detail["cards"].as_array().unwrap().len(), 1);
    assert_eq!(detail["cards"][0]["text"], "hi");
}

#[tokio::test]
async fn test_strangers_and_missing_boards_both_get_403() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let stranger = app
        .server
        .get(&format!("/boards/{}", board_id))
        .authorization_bearer(&bob.token)
        .await;
    let missing = app.server.get("/boards/999").authorization_bearer(&bob.token).await;

    assert_eq!(stranger.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_board_id_is_400_and_unknown_path_is_404() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;

    let bad_id = app.server.get("/boards/abc").authorization_bearer(&ann.token).await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);

    let unknown = app.server.get("/boards/1/owners").authorization_bearer(&ann.token).await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_path_and_legacy_forms() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .put(&format!("/boards/{}", board_id))
        .authorization_bearer(&ann.token)
        .json(&json!({ "title": "Roadmap" }))
        .await;
    assert_eq!(response.json::<Value>(), json!({ "status": "updated" }));

    let legacy = app
        .server
        .put("/boards")
        .authorization_bearer(&ann.token)
        .json(&json!({ "id": board_id, "title": "Roadmap v2" }))
        .await;
    assert_eq!(legacy.status_code(), StatusCode::OK);

    let detail: Value = app
        .server
        .get(&format!("/boards/{}", board_id))
        .authorization_bearer(&ann.token)
        .await
        .json();
    assert_eq!(detail["title"], "Roadmap v2");
}

#[tokio::test]
async fn test_only_owner_renames_or_deletes() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;
    app.grant(&ann, board_id, bob.user_id, "edit").await;

    let rename = app
        .server
        .put(&format!("/boards/{}", board_id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Mine now" }))
        .await;
    assert_eq!(rename.status_code(), StatusCode::FORBIDDEN);

    let delete = app
        .server
        .delete(&format!("/boards/{}", board_id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_board_cascades_to_cards_grants_and_shares() {
    let (app, storage) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let upload: Value = app
        .server
        .post(&format!("/boards/{}/images", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form("pic.png"))
        .await
        .json();
    let image_url = upload["url"].as_str().unwrap().to_string();
    app.create_card(&ann, board_id, json!({ "kind": "image", "image_url": image_url }))
        .await;
    app.create_card(&ann, board_id, json!({ "text": "note" })).await;
    app.grant(&ann, board_id, bob.user_id, "read").await;
    app.create_share(&ann, board_id, "edit").await;

    let response = app
        .server
        .delete(&format!("/boards/{}", board_id))
        .authorization_bearer(&ann.token)
        .await;
    assert_eq!(response.json::<Value>(), json!({ "status": "deleted" }));

    assert_eq!(app.count_rows("cards", board_id).await, 0);
    assert_eq!(app.count_rows("board_access", board_id).await, 0);
    assert_eq!(app.count_rows("board_shares", board_id).await, 0);
    assert!(storage.keys().await.is_empty());
}

#[tokio::test]
async fn test_legacy_delete_with_body_id() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .delete("/boards")
        .authorization_bearer(&ann.token)
        .json(&json!({ "id": board_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let again = app
        .server
        .delete("/boards")
        .authorization_bearer(&ann.token)
        .json(&json!({ "id": board_id }))
        .await;
    assert_eq!(again.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_set_and_clear_thumbnail() {
    let (app, storage) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .post(&format!("/boards/{}/thumbnail", board_id))
        .authorization_bearer(&ann.token)
        .multipart(image_form("Cover.PNG"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let expected_url = format!("{}/thumbnails/{}.png", STORAGE_URL, board_id);
    assert_eq!(response.json::<Value>(), json!({ "thumbnail_url": expected_url }));

    let stored = storage.get(&format!("thumbnails/{}.png", board_id)).await.unwrap();
    assert_eq!(stored.content_type, "image/png");

    let cleared = app
        .server
        .delete(&format!("/boards/{}/thumbnail", board_id))
        .authorization_bearer(&ann.token)
        .await;
    assert_eq!(cleared.json::<Value>(), json!({ "status": "thumbnail deleted" }));
    assert!(storage.keys().await.is_empty());

    let detail: Value = app
        .server
        .get(&format!("/boards/{}", board_id))
        .authorization_bearer(&ann.token)
        .await
        .json();
    assert_eq!(detail["thumbnail_url"], Value::Null);
}

#[tokio::test]
async fn test_replacing_thumbnail_with_new_extension_removes_old_blob() {
    let (app, storage) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    for name in ["cover.png", "cover.jpg"] {
        app.server
            .post(&format!("/boards/{}/thumbnail", board_id))
            .authorization_bearer(&ann.token)
            .multipart(image_form(name))
            .await
            .assert_status_ok();
    }

    assert_eq!(storage.keys().await, vec![format!("thumbnails/{}.jpg", board_id)]);
}

#[tokio::test]
async fn test_thumbnail_without_file_part_is_400() {
    let (app, _) = TestApp::new().await;
    let ann = app.signup("ann@example.com").await;
    let board_id = app.create_board(&ann, "Plan").await;

    let response = app
        .server
        .post(&format!("/boards/{}/thumbnail", board_id))
        .authorization_bearer(&ann.token)
        .multipart(MultipartForm::new().add_text("board_id", board_id.to_string()))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Missing file");
}
