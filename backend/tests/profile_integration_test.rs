//! Integration tests for the profile endpoints

mod common;

use axum::http::StatusCode;
use common::{profile_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_save_and_fetch_profile() {
    let app = TestApp::new();

    let (status, saved) = app.post_json("/api/v1/profile", &profile_body(1, "lose")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["bmr"], 1674);
    assert_eq!(saved["tdee"], 2009);
    assert_eq!(saved["daily_calorie_goal"], 1607);
    assert_eq!(saved["rate_calorie_adjustment"], -550);
    assert_eq!(saved["timeline"]["days_remaining"], 70);

    let (status, fetched) = app.get_json("/api/v1/profile?user_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["daily_calorie_goal"], 1607);
    assert_eq!(fetched["goal"], "lose");
    assert_eq!(fetched["activity_level"], "sedentary");
}

#[tokio::test]
async fn test_resave_replaces_goal() {
    let app = TestApp::new();

    app.post_json("/api/v1/profile", &profile_body(3, "lose")).await;
    let (status, saved) = app.post_json("/api/v1/profile", &profile_body(3, "gain")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["daily_calorie_goal"], 2310);
    assert_eq!(saved["rate_calorie_adjustment"], 550);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = TestApp::new();

    let body = json!({
        "user_id": 1,
        "profile": { "age": 25, "gender": "male", "goal": "maintain" }
    });
    let (status, err) = app.post_json("/api/v1/profile", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
    let message = err["error"]["message"].as_str().unwrap();
    assert!(message.contains("height_cm"));
    assert!(message.contains("activity_level"));

    let (status, _) = app.get("/api/v1/profile?user_id=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_value_names_field() {
    let app = TestApp::new();

    let mut body = profile_body(1, "maintain");
    body["profile"]["age"] = json!(0);
    let (status, err) = app.post_json("/api/v1/profile", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["field"], "age");
}

#[tokio::test]
async fn test_unknown_activity_level_rejected() {
    let app = TestApp::new();

    let mut body = profile_body(1, "maintain");
    body["profile"]["activity_level"] = json!("extreme");
    let (status, err) = app.post_json("/api/v1/profile", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
}
