//! HTTP contract of the post routes, driven through `Router::handle`.

use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use posts_api::posts::{self, ID_RANGE, PostRegistry};
use posts_api::Router;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

type App = Router<Arc<PostRegistry>>;

fn app() -> App {
    posts::app(Arc::new(PostRegistry::with_seed_posts(StdRng::seed_from_u64(11))))
}

async fn send(app: &App, method: &str, path: &str, body: Option<&str>) -> (StatusCode, Value) {
    let req = http::Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.unwrap_or_default().to_owned())))
        .unwrap();
    let res = app.handle(req).await;
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &App, body: &str) -> Value {
    let (status, value) = send(app, "POST", "/posts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    value["data"].clone()
}

#[tokio::test]
async fn root_says_hello() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World!" }));
}

#[tokio::test]
async fn list_returns_the_seed_posts() {
    let (status, body) = send(&app(), "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": [
            { "id": 1, "title": "title of post 1", "content": "content of post 1", "published": true, "rating": null },
            { "id": 2, "title": "title of post 2", "content": "content of post 2", "published": true, "rating": null },
        ]})
    );
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = app();
    let post = create(&app, r#"{"title":"hello","content":"world","rating":3}"#).await;

    let id = post["id"].as_i64().unwrap();
    assert!(ID_RANGE.contains(&id));
    assert_eq!(post["title"], "hello");
    assert_eq!(post["content"], "world");
    assert_eq!(post["published"], true);
    assert_eq!(post["rating"], 3);

    let (status, body) = send(&app, "GET", &format!("/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], post);

    let (_, list) = send(&app, "GET", "/posts", None).await;
    let list = list["data"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[2], post);
}

#[tokio::test]
async fn create_rejects_invalid_bodies() {
    let app = app();
    for body in [
        "",
        "not json",
        r#"{"title":"only a title"}"#,
        r#"{"title":5,"content":"c"}"#,
        r#"{"title":"t","content":"c","published":"maybe"}"#,
        r#"{"title":"t","content":"c","rating":5.5}"#,
        r#"{"title":"t","content":"c","rating":"five"}"#,
        r#"{"title":"","content":"c"}"#,
    ] {
        let (status, value) = send(&app, "POST", "/posts", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        let detail = value["detail"].as_array().unwrap();
        assert!(!detail.is_empty(), "body: {body}");
        assert!(detail.iter().all(|e| e["loc"].is_array() && e["msg"].is_string() && e["type"].is_string()));
    }
    let (_, list) = send(&app, "GET", "/posts", None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_coerces_loose_scalars() {
    let app = app();
    let post = create(&app, r#"{"title":"t","content":"c","published":"yes","rating":"5"}"#).await;
    assert_eq!(post["published"], true);
    assert_eq!(post["rating"], 5);

    let post = create(&app, r#"{"title":"t","content":"c","published":0,"rating":5.0}"#).await;
    assert_eq!(post["published"], false);
    assert_eq!(post["rating"], 5);
}

#[tokio::test]
async fn missing_field_detail_points_at_the_field() {
    let (status, body) = send(&app(), "POST", "/posts", Some(r#"{"title":"t"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "detail": [{ "loc": ["body", "content"], "msg": "Field required", "type": "missing" }] })
    );
}

#[tokio::test]
async fn fetch_missing_is_404_with_message() {
    let (status, body) = send(&app(), "GET", "/posts/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "post with ID: -1 was not found" }));
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = app();
    for method in ["GET", "DELETE"] {
        let (status, _) = send(&app, method, "/posts/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
    let (status, _) = send(&app, "PUT", "/posts/1.5", Some(r#"{"title":"t","content":"c"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_replaces_the_whole_post() {
    let app = app();
    create(&app, r#"{"title":"a","content":"b"}"#).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/posts/1",
        Some(r#"{"title":"new","content":"text","published":false,"rating":9}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let expected = json!({ "id": 1, "title": "new", "content": "text", "published": false, "rating": 9 });
    assert_eq!(body["message"], expected);

    let (_, list) = send(&app, "GET", "/posts", None).await;
    assert_eq!(list["data"][0], expected);

    // Omitted optional fields revert to their defaults.
    let (_, body) = send(&app, "PUT", "/posts/1", Some(r#"{"title":"new","content":"text"}"#)).await;
    assert_eq!(body["message"]["published"], true);
    assert_eq!(body["message"]["rating"], Value::Null);
}

#[tokio::test]
async fn update_missing_is_404_and_changes_nothing() {
    let app = app();
    let (_, before) = send(&app, "GET", "/posts", None).await;
    let (status, body) = send(&app, "PUT", "/posts/77", Some(r#"{"title":"t","content":"c"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "post with ID: 77 was not found");
    let (_, after) = send(&app, "GET", "/posts", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_validates_body_before_lookup() {
    let (status, _) = send(&app(), "PUT", "/posts/77", Some(r#"{"title":"t"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let app = app();
    let post = create(&app, r#"{"title":"t","content":"c"}"#).await;
    let path = format!("/posts/{}", post["id"]);

    let (status, body) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/posts", None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let app = app();
    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));

    let (status, body) = send(&app, "PATCH", "/posts/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "detail": "Method Not Allowed" }));
}

#[tokio::test]
async fn health_probes() {
    let app = app();
    for path in ["/healthz", "/readyz"] {
        let req = http::Request::get(path).body(Full::new(Bytes::new())).unwrap();
        let res = app.handle(req).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
}
