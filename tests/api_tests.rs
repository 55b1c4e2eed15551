mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{generate_recommendation, generate_wrong_recommendation, TestApp, YOUTUBE_LINK};
use recommendations_api::models::Recommendation;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    app.create_recommendation().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["recommendations"], 1);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_create_recommendation() {
    let app = TestApp::new();
    let body = generate_recommendation();

    let response = app.server.post("/recommendations").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let stored = app.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, body["name"].as_str().unwrap());
    assert_eq!(stored[0].youtube_link, YOUTUBE_LINK);
    assert_eq!(stored[0].score, 0);
}

#[tokio::test]
async fn test_create_duplicate_name_conflicts() {
    let app = TestApp::new();
    let body = generate_recommendation();

    app.server
        .post("/recommendations")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.post("/recommendations").json(&body).await;
    response.assert_status(StatusCode::CONFLICT);
    let error: serde_json::Value = response.json();
    assert_eq!(error["error"], "Recommendations names must be unique");
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn test_create_wrong_body_is_unprocessable() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/recommendations")
        .json(&generate_wrong_recommendation())
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_create_non_youtube_link_is_unprocessable() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/recommendations")
        .json(&json!({ "name": "Somewhere else", "youtubeLink": "https://vimeo.com/1" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_upvote() {
    let app = TestApp::new();
    let created = app.create_recommendation().await;

    app.server
        .post(&format!("/recommendations/{}/upvote", created.id))
        .await
        .assert_status_ok();

    let updated = app.find(created.id).await.unwrap();
    assert_eq!(updated.score, created.score + 1);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.youtube_link, created.youtube_link);
}

#[tokio::test]
async fn test_vote_unknown_id_is_not_found() {
    let app = TestApp::new();

    app.server
        .post("/recommendations/99/upvote")
        .await
        .assert_status_not_found();
    app.server
        .post("/recommendations/99/downvote")
        .await
        .assert_status_not_found();
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_downvote_keeps_recommendation() {
    let app = TestApp::new();
    let created = app.create_recommendation().await;

    app.server
        .post(&format!("/recommendations/{}/downvote", created.id))
        .await
        .assert_status_ok();

    let updated = app.find(created.id).await.unwrap();
    assert_eq!(updated.score, -1);
}

#[tokio::test]
async fn test_downvote_removes_after_score_below_threshold() {
    let app = TestApp::new();
    let created = app.create_recommendation().await;
    let path = format!("/recommendations/{}/downvote", created.id);

    for _ in 0..5 {
        app.server.post(&path).await.assert_status_ok();
    }
    assert_eq!(app.find(created.id).await.unwrap().score, -5);

    app.server.post(&path).await.assert_status_ok();
    assert!(app.find(created.id).await.is_none());

    app.server
        .get(&format!("/recommendations/{}", created.id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_returns_ten_most_recent() {
    let app = TestApp::new();
    for _ in 0..12 {
        app.create_recommendation().await;
    }

    let response = app.server.get("/recommendations").await;
    response.assert_status_ok();
    let list: Vec<Recommendation> = response.json();

    assert_eq!(list.len(), 10);
    assert_eq!(list.first().unwrap().id, 12);
    assert_eq!(list.last().unwrap().id, 3);
}

#[tokio::test]
async fn test_get_by_id() {
    let app = TestApp::new();
    let created = app.create_recommendation().await;

    let response = app
        .server
        .get(&format!("/recommendations/{}", created.id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], created.id);
    assert_eq!(body["name"], created.name);
    assert_eq!(body["youtubeLink"], YOUTUBE_LINK);
    assert_eq!(body["score"], 0);
}

#[tokio::test]
async fn test_get_by_malformed_id_is_bad_request() {
    let app = TestApp::new();

    app.server
        .get("/recommendations/abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_random_popular_bucket() {
    let app = TestApp::with_draw(0.5);
    app.create_with_score(3).await;
    let popular = app.create_with_score(11).await;

    let response = app.server.get("/recommendations/random").await;
    response.assert_status_ok();
    let picked: Recommendation = response.json();
    assert_eq!(picked.id, popular.id);
    assert!(picked.score > 10);
}

#[tokio::test]
async fn test_random_rest_bucket() {
    let app = TestApp::with_draw(0.8);
    app.create_with_score(11).await;
    let plain = app.create_with_score(10).await;

    let picked: Recommendation = app.server.get("/recommendations/random").await.json();
    assert_eq!(picked.id, plain.id);
    assert!(picked.score <= 10);
}

#[tokio::test]
async fn test_random_empty_bucket_is_not_found() {
    let app = TestApp::with_draw(0.1);
    app.create_with_score(2).await;

    app.server
        .get("/recommendations/random")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_random_without_recommendations_is_not_found() {
    let app = TestApp::new();

    app.server
        .get("/recommendations/random")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_top_orders_by_score() {
    let app = TestApp::new();
    let low = app.create_with_score(1).await;
    let high = app.create_with_score(7).await;
    let mid = app.create_with_score(4).await;

    let top: Vec<Recommendation> = app.server.get("/recommendations/top/2").await.json();
    assert_eq!(
        top.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![high.id, mid.id]
    );

    let all: Vec<Recommendation> = app.server.get("/recommendations/top/10").await.json();
    assert_eq!(all.len(), 3);
    assert_eq!(all.last().unwrap().id, low.id);
}

#[tokio::test]
async fn test_reset_route_disabled_by_default() {
    let app = TestApp::new();
    app.create_recommendation().await;

    let response = app.server.post("/e2e/reset").await;
    response.assert_status_not_found();
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn test_reset_route_clears_store() {
    let app = TestApp::with_test_routes();
    app.create_recommendation().await;
    app.create_recommendation().await;

    app.server.post("/e2e/reset").await.assert_status_ok();
    assert_eq!(app.count().await, 0);
}
