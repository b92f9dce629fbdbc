use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{InMemoryStore, NewTodo, StoreError, TodoId, TodoItem, TodoReadOutput, TodoStore};
use todo_storage::SqliteStore;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

fn app() -> Router {
    todo_server::app(Arc::new(InMemoryStore::new()))
}

fn sqlite_app() -> Router {
    todo_server::app(Arc::new(SqliteStore::in_memory().unwrap()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Reads work, every write fails.
struct BrokenStore;

#[async_trait]
impl TodoStore for BrokenStore {
    async fn get_all(&self, _: &CancellationToken) -> Result<Vec<TodoItem>, StoreError> {
        Ok(Vec::new())
    }

    async fn get_by_id(
        &self,
        _: TodoId,
        _: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        Ok(None)
    }

    async fn add(&self, _: NewTodo, _: &CancellationToken) -> Result<TodoItem, StoreError> {
        Err(StoreError::backend(io::Error::other("database is locked")))
    }

    async fn update(
        &self,
        _: TodoItem,
        _: &CancellationToken,
    ) -> Result<Option<TodoItem>, StoreError> {
        Err(StoreError::backend(io::Error::other("database is locked")))
    }

    async fn delete(&self, _: TodoId, _: &CancellationToken) -> Result<bool, StoreError> {
        Err(StoreError::backend(io::Error::other("database is locked")))
    }
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoReadOutput> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_location() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()[http::header::LOCATION].to_str().unwrap().to_string();
    let todo: TodoReadOutput = body_json(resp).await;
    assert_eq!(location, format!("/todos/{}", todo.id));
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.is_done);
}

#[tokio::test]
async fn create_todo_trims_title() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"title":"  New Todo  ","isDone":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: TodoReadOutput = body_json(resp).await;
    assert_eq!(todo.title, "New Todo");
    assert!(todo.is_done);
}

#[tokio::test]
async fn create_todo_short_title_returns_400_with_field_message() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"ab","isDone":false}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body["errors"]["title"][0],
        "title must be at least 3 characters"
    );
}

#[tokio::test]
async fn create_todo_blank_title_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"     "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["errors"]["title"][0], "title must not be empty");
}

#[tokio::test]
async fn create_todo_missing_title_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"isDone":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_todo_title_length_bounds() {
    let app = app();
    let at_limit = serde_json::json!({ "title": "x".repeat(200) }).to_string();
    let over_limit = serde_json::json!({ "title": "x".repeat(201) }).to_string();

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todos", r#"{"title":"abc"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todos", &at_limit))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todos", &over_limit))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // rejected inputs never reach the store
    let resp = app.oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<TodoReadOutput> = body_json(resp).await;
    assert_eq!(todos.len(), 2);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_todo_without_content_type_returns_415() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos")
                .body(r#"{"title":"Buy milk"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn create_todo_store_failure_returns_500() {
    let app = todo_server::app(Arc::new(BrokenStore));
    let resp = app
        .oneshot(json_request("POST", "/todos", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "internal server error");
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app().oneshot(empty_request("GET", "/todos/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_todo_non_integer_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/todos/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/999",
            r#"{"title":"Nope nope","isDone":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_invalid_title_returns_400_before_lookup() {
    // validation runs first, so even a missing id answers 400
    let resp = app()
        .oneshot(json_request("PUT", "/todos/999", r#"{"title":"ab"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_todo_store_failure_returns_500() {
    let app = todo_server::app(Arc::new(BrokenStore));
    let resp = app
        .oneshot(json_request("PUT", "/todos/1", r#"{"title":"Valid"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/todos/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = sqlite_app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/todos",
            r#"{"title":"Task 1","isDone":false}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[http::header::LOCATION], "/todos/1");
    let created: serde_json::Value = body_json(resp).await;
    assert_eq!(
        created,
        serde_json::json!({"id": 1, "title": "Task 1", "isDone": false})
    );

    // list: should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoReadOutput> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, TodoId(1));

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: serde_json::Value = body_json(resp).await;
    assert_eq!(fetched, created);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/todos/1",
            r#"{"title":"Done","isDone":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = body_json(resp).await;
    assert_eq!(
        updated,
        serde_json::json!({"id": 1, "title": "Done", "isDone": true})
    );

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoReadOutput> = body_json(resp).await;
    assert!(todos.is_empty());
}
