//! End-to-end tests over the HTTP surface.

mod test_utils;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;
use storybarn_core::NewImage;
use storybarn_error::ProviderErrorKind;
use storybarn_repository::{ImageRepository, StoryRepository};
use test_utils::{
    analysis_reply, scenario_config, story_reply, MockImageDriver, MockReply, MockTextDriver, Rig,
};

fn happy_rig() -> Rig {
    Rig::new(
        MockTextDriver::new(vec![MockReply::Success(story_reply())]),
        MockImageDriver::new(MockReply::Success("png-bytes".to_string())),
    )
}

#[tokio::test]
async fn scenario_a_generate_story_round_trip() {
    let rig = happy_rig();

    let response = rig
        .server
        .post("/api/stories/generate")
        .json(&scenario_config())
        .await;

    response.assert_status(StatusCode::OK);
    let story: Value = response.json();
    assert!(story["id"].as_i64().unwrap() >= 1);
    assert_eq!(story["title"], "Biscuit Saves the Barn");
    assert_eq!(story["theme"], "friendship");
    assert_eq!(story["artStyle"]["style"], "whimsical");
    assert_eq!(story["metadata"]["wordCount"], 480);

    // The story is fetchable by its id.
    let id = story["id"].as_i64().unwrap();
    let fetched = rig.server.get(&format!("/api/stories/{}", id)).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.json::<Value>()["title"], "Biscuit Saves the Barn");
}

#[tokio::test]
async fn scenario_b_missing_theme_is_rejected_with_no_story_created() {
    let rig = happy_rig();

    let mut config = scenario_config();
    config.as_object_mut().unwrap().remove("theme");

    let response = rig.server.post("/api/stories/generate").json(&config).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_failed");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "theme"));

    // No provider call, no story persisted.
    assert_eq!(rig.text.call_count(), 0);
    assert_eq!(rig.stories.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn scenario_c_persistent_429_returns_transient_envelope_after_three_attempts() {
    let rig = Rig::new(
        MockTextDriver::new(vec![MockReply::Error(ProviderErrorKind::RateLimited {
            retry_after_secs: Some(15),
        })]),
        MockImageDriver::new(MockReply::Success("png-bytes".to_string())),
    );

    let response = rig
        .server
        .post("/api/stories/generate")
        .json(&scenario_config())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"], "provider_transient");
    assert_eq!(body["retry"], true);
    assert_eq!(body["retryAfterSeconds"], 15);
    // Human message, not raw provider text.
    assert!(body["message"].as_str().unwrap().contains("try again"));

    assert_eq!(rig.text.call_count(), 3);
    assert_eq!(rig.stories.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn scenario_d_unknown_story_is_not_found() {
    let rig = happy_rig();

    let response = rig.server.get("/api/stories/424242").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn fatal_provider_errors_are_not_retried_and_say_why() {
    let rig = Rig::new(
        MockTextDriver::new(vec![MockReply::Error(ProviderErrorKind::ContentPolicy(
            "flagged".to_string(),
        ))]),
        MockImageDriver::new(MockReply::Success("png-bytes".to_string())),
    );

    let response = rig
        .server
        .post("/api/stories/generate")
        .json(&scenario_config())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "provider_fatal");
    assert_eq!(body["retry"], false);
    assert!(body["message"].as_str().unwrap().contains("content policy"));
    assert_eq!(rig.text.call_count(), 1);
}

#[tokio::test]
async fn upload_stores_files_under_the_book() {
    let rig = happy_rig();

    let form = MultipartForm::new()
        .add_text("bookId", "book-9")
        .add_part(
            "file",
            Part::bytes(b"fake png bytes".to_vec())
                .file_name("pup.png")
                .mime_type("image/png"),
        );

    let response = rig.server.post("/api/upload").multipart(form).await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["bookId"], "book-9");
    let path = images[0]["path"].as_str().unwrap();
    assert!(path.starts_with("book-9/"));
    assert!(path.ends_with(".png"));

    // Bytes really landed in the store.
    assert_eq!(rig.store.read(path).await.unwrap(), b"fake png bytes");
}

#[tokio::test]
async fn upload_without_a_file_is_rejected() {
    let rig = happy_rig();

    let form = MultipartForm::new().add_text("bookId", "book-9");
    let response = rig.server.post("/api/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "validation_failed");
}

#[tokio::test]
async fn midjourney_generate_returns_a_pending_image() {
    let rig = happy_rig();

    let response = rig
        .server
        .post("/api/images/generate")
        .json(&serde_json::json!({
            "description": "a pup guarding the chicken coop",
            "artStyle": "whimsical"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(body["imageId"].as_i64().unwrap() >= 1);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn dalle_generate_returns_id_and_path() {
    let rig = happy_rig();

    let response = rig
        .server
        .post("/api/images/generate-dalle")
        .json(&serde_json::json!({
            "prompt": "a pup napping in the hay",
            "artStyle": "watercolor",
            "colors": ["black", "tan"],
            "bookId": "book-3"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(body["id"].as_i64().unwrap() >= 1);
    assert!(body["path"].as_str().unwrap().starts_with("book-3/"));
}

#[tokio::test]
async fn analyze_merges_profile_with_path() {
    let rig = Rig::new(
        MockTextDriver::new(vec![MockReply::Success(analysis_reply())]),
        MockImageDriver::new(MockReply::Success("png-bytes".to_string())),
    );

    // Seed an image through the dalle endpoint so bytes exist on disk.
    let created: Value = rig
        .server
        .post("/api/images/generate-dalle")
        .json(&serde_json::json!({"prompt": "a pup", "bookId": "book-1"}))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = rig
        .server
        .post(&format!("/api/images/{}/analyze", id))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"].as_i64().unwrap(), id);
    assert_eq!(body["path"], created["path"]);
    assert_eq!(body["characterProfile"]["name"], "Biscuit");

    // Second analysis is a cache hit: no extra provider call.
    let calls_after_first = rig.text.call_count();
    let again = rig
        .server
        .post(&format!("/api/images/{}/analyze", id))
        .await;
    again.assert_status(StatusCode::OK);
    assert_eq!(rig.text.call_count(), calls_after_first);
    assert_eq!(again.json::<Value>()["description"], body["description"]);
}

#[tokio::test]
async fn analyze_distinguishes_missing_record_from_missing_file() {
    let rig = happy_rig();

    // Unknown record.
    let response = rig.server.post("/api/images/999/analyze").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "not_found");

    // Known record, bytes gone from disk.
    let orphan = rig
        .images
        .create(NewImage {
            book_id: "book-1".to_string(),
            path: "book-1/vanished.png".to_string(),
            ..NewImage::default()
        })
        .await
        .unwrap();

    let response = rig
        .server
        .post(&format!("/api/images/{}/analyze", orphan.id))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "file_missing");
}

#[tokio::test]
async fn images_list_returns_insertion_order() {
    let rig = happy_rig();

    for prompt in ["first", "second"] {
        rig.server
            .post("/api/images/generate-dalle")
            .json(&serde_json::json!({"prompt": prompt}))
            .await
            .assert_status(StatusCode::OK);
    }

    let response = rig.server.get("/api/images").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let images = body.as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0]["id"].as_i64().unwrap() < images[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn debug_logs_group_by_provider() {
    let rig = happy_rig();

    rig.server
        .post("/api/stories/generate")
        .json(&scenario_config())
        .await
        .assert_status(StatusCode::OK);
    rig.server
        .post("/api/images/generate")
        .json(&serde_json::json!({"description": "a pup"}))
        .await
        .assert_status(StatusCode::OK);

    let response = rig.server.get("/api/debug/logs").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(!body["openai"].as_array().unwrap().is_empty());
    assert!(!body["midjourney"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_is_ok() {
    let rig = happy_rig();
    let response = rig.server.get("/health").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn uploads_are_served_statically() {
    let rig = happy_rig();

    let created: Value = rig
        .server
        .post("/api/images/generate-dalle")
        .json(&serde_json::json!({"prompt": "a pup", "bookId": "book-1"}))
        .await
        .json();
    let path = created["path"].as_str().unwrap();

    let response = rig.server.get(&format!("/uploads/{}", path)).await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), b"png-bytes");
}
