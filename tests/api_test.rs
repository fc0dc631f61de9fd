//! HTTP-level tests: routing, auth middleware and error mapping

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use common::{seed_board, seed_pin, seed_user, TestDatabase};
use pinboard::backend::middleware::USER_ID_HEADER;
use pinboard::backend::server::init::create_app_with_pool;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

fn json_request(method: &str, uri: &str, user_id: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_user_endpoint() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            None,
            serde_json::json!({ "username": "alice" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_duplicate_username_maps_to_conflict() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());
    seed_user(db.pool(), "alice").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            None,
            serde_json::json!({ "username": "alice" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["status"], 409);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_protected_route_requires_user_header() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());

    let response = app
        .oneshot(Request::get("/api/notifications").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_acting_user_rejected() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());

    let response = app
        .oneshot(
            Request::get("/api/notifications")
                .header(USER_ID_HEADER, "no-such-user")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_rejected() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());
    let alice = seed_user(db.pool(), "alice").await;

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
        .bind(&alice.id)
        .execute(db.pool())
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::get("/api/notifications")
                .header(USER_ID_HEADER, &alice.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_flow_over_http() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());
    let owner = seed_user(db.pool(), "owner").await;
    let fan = seed_user(db.pool(), "fan").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    let like_uri = format!("/api/pins/{}/like", pin.id);

    let response = app
        .clone()
        .oneshot(
            Request::post(like_uri.as_str())
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::get(like_uri.as_str())
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["liked"], true);

    // Liking twice maps to 409.
    let response = app
        .clone()
        .oneshot(
            Request::post(like_uri.as_str())
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(
            Request::delete(like_uri.as_str())
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Removing a like that is gone maps to 404.
    let response = app
        .oneshot(
            Request::delete(like_uri.as_str())
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invitation_flow_over_http() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());
    let owner = seed_user(db.pool(), "owner").await;
    let invitee = seed_user(db.pool(), "invitee").await;
    let board = seed_board(db.pool(), &owner.id, "Recipes").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/invitations",
            Some(&owner.id),
            serde_json::json!({
                "board_id": board.id,
                "to_username": "invitee",
                "permission": "edit"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let invitation = body_json(response).await;
    assert_eq!(invitation["status"], "pending");
    let invitation_id = invitation["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/invitations/{}/respond", invitation_id),
            Some(&invitee.id),
            serde_json::json!({ "action": "accept" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "accepted");

    let response = app
        .oneshot(
            Request::get(format!("/api/boards/{}/access", board.id))
                .header(USER_ID_HEADER, &invitee.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let access = body_json(response).await;
    assert_eq!(access["can_edit"], true);
    assert_eq!(access["can_view"], true);
}

#[tokio::test]
async fn test_blocked_interaction_maps_to_forbidden() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());
    let owner = seed_user(db.pool(), "owner").await;
    let fan = seed_user(db.pool(), "fan").await;
    let board = seed_board(db.pool(), &owner.id, "Art").await;
    let pin = seed_pin(db.pool(), &owner.id, &board.id, "Sunset").await;

    pinboard::backend::social::blocks::block(db.pool(), &owner.id, &fan.id)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::post(format!("/api/pins/{}/like", pin.id))
                .header(USER_ID_HEADER, &fan.id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn test_unmatched_route_falls_back_to_404() {
    let db = TestDatabase::new().await;
    let app = create_app_with_pool(db.pool().clone());

    let response = app
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"404 Not Found");
}

#[tokio::test]
async fn test_migrations_persist_across_reconnect() {
    use sqlx::sqlite::SqlitePoolOptions;

    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("pinboard.db").display()
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    let alice = seed_user(&pool, "alice").await;
    pool.close().await;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    // Re-running migrations against an up-to-date file is a no-op.
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    let found = pinboard::backend::users::db::find_user_by_id(&pool, &alice.id)
        .await
        .unwrap()
        .expect("User should survive reconnect");
    assert_eq!(found.username, "alice");
}
