use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use todo_server::db::{DbError, MemoryStore, QueryResult, TodoStore};
use todo_server::{build_hello_router, build_router, AppState, Dialect, ServerConfig};

fn app(dialect: Dialect) -> Router {
    let store = Arc::new(MemoryStore::new(dialect));
    build_router(AppState::new(store), &ServerConfig::default())
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Send one request; assert the envelope mirrors the HTTP status.
async fn send(app: &Router, req: Request<String>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = body_json(response).await;
    assert_eq!(
        body["statusCode"].as_u64(),
        Some(status.as_u16() as u64),
        "envelope statusCode must match HTTP status: {body}"
    );
    (status, body)
}

/// Store whose every query fails, as a dropped connection would.
struct FailingStore(Dialect);

impl FailingStore {
    fn error() -> DbError {
        DbError::Store("connection reset by peer".into())
    }
}

#[async_trait]
impl TodoStore for FailingStore {
    fn dialect(&self) -> Dialect {
        self.0
    }

    async fn list(&self) -> Result<QueryResult, DbError> {
        Err(Self::error())
    }

    async fn get(&self, _id: i64) -> Result<QueryResult, DbError> {
        Err(Self::error())
    }

    async fn create(&self, _title: &str) -> Result<QueryResult, DbError> {
        Err(Self::error())
    }

    async fn update(&self, _id: i64, _title: &str, _completed: bool) -> Result<QueryResult, DbError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: i64) -> Result<QueryResult, DbError> {
        Err(Self::error())
    }
}

fn failing_app(dialect: Dialect) -> Router {
    build_router(
        AppState::new(Arc::new(FailingStore(dialect))),
        &ServerConfig::default(),
    )
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, body) = send(app, json_request("POST", "/api/v1/", json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["todo"].clone()
}

// --- welcome & fallback ---

#[tokio::test]
async fn welcome_names_dialect() {
    let (status, body) = send(&app(Dialect::MySql), request("GET", "/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["message"].as_str().unwrap().contains("MYSQL"));
    assert_eq!(body["data"]["language"], "rust");
}

#[tokio::test]
async fn unknown_route_is_404_naming_path() {
    let (status, body) = send(&app(Dialect::Postgres), request("GET", "/api/v2/things")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "NOT FOUND");
    assert_eq!(
        body["message"],
        "Route '/api/v2/things' does not exists on the server."
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn wrong_method_on_known_path_is_404() {
    let (status, body) = send(&app(Dialect::Postgres), request("PATCH", "/api/v1/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("/api/v1/1"));

    let (status, _) = send(&app(Dialect::Postgres), request("DELETE", "/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trailing_slash_is_not_normalized() {
    let (status, body) = send(&app(Dialect::Postgres), request("GET", "/api/v1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("'/api/v1'"));
}

// --- list ---

#[tokio::test]
async fn list_empty_is_200() {
    let (status, body) = send(&app(Dialect::Postgres), request("GET", "/api/v1/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["todos"], json!([]));
}

#[tokio::test]
async fn list_is_newest_first_and_capped_at_100() {
    let app = app(Dialect::MySql);
    for i in 0..105 {
        create(&app, &format!("todo {i}")).await;
    }

    let (_, body) = send(&app, request("GET", "/api/v1/")).await;
    let todos = body["data"]["todos"].as_array().unwrap();

    assert_eq!(todos.len(), 100);
    assert_eq!(todos[0]["title"], "todo 104");
    let stamps: Vec<&str> = todos
        .iter()
        .map(|t| t["created_at"].as_str().unwrap())
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
}

// --- create / get ---

#[tokio::test]
async fn create_then_get_returns_same_todo() {
    let app = app(Dialect::Postgres);
    let created = create(&app, "write tests").await;

    assert_eq!(created["title"], "write tests");
    assert_eq!(created["completed"], false);
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let (status, body) = send(&app, request("GET", &format!("/api/v1/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo retrieved.");
    assert_eq!(body["data"]["todo"], created);
}

#[tokio::test]
async fn get_missing_is_404_naming_id() {
    let (status, body) = send(&app(Dialect::Postgres), request("GET", "/api/v1/77")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo with id 77 was not found.");
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let (status, body) = send(&app(Dialect::MySql), request("GET", "/api/v1/abc")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo with id abc was not found.");
}

#[tokio::test]
async fn create_without_title_is_rejected_with_envelope() {
    let (status, body) = send(
        &app(Dialect::Postgres),
        json_request("POST", "/api/v1/", json!({ "name": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "UNPROCESSABLE ENTITY");
    assert!(body["message"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn create_without_content_type_is_rejected_with_envelope() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/")
        .body(r#"{"title":"x"}"#.to_string())
        .unwrap();
    let (status, _) = send(&app(Dialect::Postgres), req).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- update ---

#[tokio::test]
async fn update_changes_only_title_and_completed() {
    let app = app(Dialect::Postgres);
    let created = create(&app, "draft").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/{id}"),
            json!({ "title": "final", "completed": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "todo updated");
    assert_eq!(
        body["data"],
        json!({ "id": id, "title": "final", "completed": true })
    );

    let (_, body) = send(&app, request("GET", &format!("/api/v1/{id}"))).await;
    let todo = &body["data"]["todo"];
    assert_eq!(todo["id"], created["id"]);
    assert_eq!(todo["created_at"], created["created_at"]);
    assert_eq!(todo["title"], "final");
    assert_eq!(todo["completed"], true);
}

#[tokio::test]
async fn update_missing_is_404() {
    let (status, body) = send(
        &app(Dialect::MySql),
        json_request("PUT", "/api/v1/5", json!({ "title": "x", "completed": false })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo with id 5 was not found.");
}

// --- delete ---

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app(Dialect::Postgres);
    let created = create(&app, "temp").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, request("DELETE", &format!("/api/v1/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo deleted");
    assert_eq!(body["data"]["todo"], created);

    let (status, _) = send(&app, request("GET", &format!("/api/v1/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_on_mysql_is_404() {
    let (status, body) = send(&app(Dialect::MySql), request("DELETE", "/api/v1/3")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo by id 3 was not found");
}

#[tokio::test]
async fn delete_missing_on_postgres_is_500_with_absence_message() {
    let (status, body) = send(&app(Dialect::Postgres), request("DELETE", "/api/v1/3")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "There's no such todo of id 3");
    assert!(body.get("data").is_none());
}

// --- table administration ---

#[tokio::test]
async fn postgres_lists_tables() {
    let (status, body) = send(&app(Dialect::Postgres), request("GET", "/api/v1/tables")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["tables"][0]["tablename"], "todos");
}

#[tokio::test]
async fn postgres_create_existing_table_is_500() {
    let (status, body) = send(&app(Dialect::Postgres), request("POST", "/api/v1/tables")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn postgres_tables_path_rejects_put_and_delete_as_unknown_route() {
    let app = app(Dialect::Postgres);

    for method in ["PUT", "DELETE"] {
        let (status, body) = send(&app, request(method, "/api/v1/tables")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "Route '/api/v1/tables' does not exists on the server."
        );
    }
}

#[tokio::test]
async fn mysql_has_no_table_routes() {
    let (status, body) = send(&app(Dialect::MySql), request("POST", "/api/v1/tables")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("/api/v1/tables"));
}

// --- store failures ---

#[tokio::test]
async fn store_error_reaches_client_as_500_envelope() {
    for dialect in [Dialect::Postgres, Dialect::MySql] {
        let app = failing_app(dialect);
        let requests = [
            request("GET", "/api/v1/"),
            request("GET", "/api/v1/1"),
            json_request("POST", "/api/v1/", json!({ "title": "x" })),
            json_request("PUT", "/api/v1/1", json!({ "title": "x", "completed": true })),
            request("DELETE", "/api/v1/1"),
        ];

        for req in requests {
            let (status, body) = send(&app, req).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["status"], "INTERNAL SERVER ERROR");
            assert_eq!(
                body["message"],
                "There was an error processing your request: connection reset by peer"
            );
            assert!(body.get("data").is_none());
        }
    }
}

// --- end-to-end scenario ---

#[tokio::test]
async fn buy_milk_lifecycle() {
    let app = app(Dialect::MySql);

    let (status, body) = send(&app, json_request("POST", "/api/v1/", json!({ "title": "buy milk" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["data"]["todo"]["id"], 1);
    assert_eq!(body["data"]["todo"]["title"], "buy milk");
    assert_eq!(body["data"]["todo"]["completed"], false);

    let (status, body) = send(&app, request("GET", "/api/v1/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["todo"]["title"], "buy milk");

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/v1/1", json!({ "title": "buy milk", "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], true);

    let (status, _) = send(&app, request("DELETE", "/api/v1/1")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/api/v1/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- boilerplate server ---

#[tokio::test]
async fn hello_router_serves_welcome_and_catch_all_only() {
    let app = build_hello_router(&ServerConfig::default());

    let (status, body) = send(&app, request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "This is a minimal boilerplate server.");

    let (status, _) = send(&app, request("GET", "/api/v1/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
