// ABOUTME: End-to-end smoke test for the full roster lifecycle over a real SQLite file.
// ABOUTME: Tests create, get, list, update, delete, and reopening the database from disk.

use std::sync::Arc;

use axum::body::Body;
use http::Request;
use roster_server::{AppState, SharedState, create_router};
use roster_store::{RecordStore, SqliteStore};
use tower::ServiceExt;

/// Helper to create a test AppState over the SQLite file at `path`.
fn test_app_state(path: &std::path::Path) -> SharedState {
    let store = SqliteStore::open(path).unwrap();
    Arc::new(AppState::new(Arc::new(store)))
}

/// Helper to extract JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn smoke_test_full_lifecycle() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("storage").join("storage.db");
    let state = test_app_state(&db_path);

    // 1. POST /api/students -> 201 {"id": 1}
    let app = create_router(Arc::clone(&state));
    let ann = serde_json::json!({"name": "Ann", "email": "ann@x.com", "age": 20});
    let resp = app
        .oneshot(json_request("POST", "/api/students", &ann))
        .await
        .unwrap();

    assert_eq!(resp.status(), 201, "create should return 201");
    assert_eq!(json_body(resp).await, serde_json::json!({"id": 1}));

    // 2. GET /api/students/1 -> the record plus its id
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/api/students/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), 200, "get should return 200");
    assert_eq!(
        json_body(resp).await,
        serde_json::json!({"id": 1, "name": "Ann", "email": "ann@x.com", "age": 20})
    );

    // 3. A second student shows up in the list
    let app = create_router(Arc::clone(&state));
    let bob = serde_json::json!({"name": "Bob", "email": "bob@y.org", "age": 33});
    let resp = app
        .oneshot(json_request("POST", "/api/students", &bob))
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let bob_id = json_body(resp).await["id"].as_i64().unwrap();

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/api/students").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let list = json_body(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 2, "should list two students");

    // 4. PUT replaces every field
    let app = create_router(Arc::clone(&state));
    let robert = serde_json::json!({"name": "Robert", "email": "robert@y.org", "age": 34});
    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/students/{bob_id}"),
            &robert,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "update should return 200");
    assert_eq!(
        json_body(resp).await,
        serde_json::json!("Student updated successfully")
    );

    // 5. DELETE /api/students/1 -> 200, then GET -> not found
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::delete("/api/students/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "delete should return 200");
    assert_eq!(
        json_body(resp).await,
        serde_json::json!("Student deleted successfully")
    );

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/api/students/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 500, "a missing student is reported as a store error");
    let json = json_body(resp).await;
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"], "student not found with id 1");

    // 6. Reopen the file: the schema step is idempotent and the updated row persists
    drop(state);
    let state = test_app_state(&db_path);
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::get(format!("/api/students/{bob_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        json_body(resp).await,
        serde_json::json!({"id": bob_id, "name": "Robert", "email": "robert@y.org", "age": 34})
    );
}

#[tokio::test]
async fn smoke_test_invalid_input_never_persists() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_app_state(&dir.path().join("students.db"));

    let app = create_router(Arc::clone(&state));
    let bad = serde_json::json!({"name": "Ann", "email": "ann-at-x.com", "age": 0});
    let resp = app
        .oneshot(json_request("POST", "/api/students", &bad))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json = json_body(resp).await;
    assert_eq!(json["error"].as_array().unwrap().len(), 2);

    assert!(state.store.list().await.unwrap().is_empty());
}
