use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use movies::{MemoryStore, Router, SharedStore, api};
use serde_json::{Value, json};

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

fn app() -> Router<SharedStore> {
    api::routes(Arc::new(MemoryStore::seeded()))
}

async fn call(app: &Router<SharedStore>, method: Method, path: &str, body: &str) -> Reply {
    let req = http::Request::builder()
        .method(method)
        .uri(path)
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap();
    let res = app.handle(req).await;
    let status = res.status();
    let content_type = res
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    Reply { status, content_type, body: String::from_utf8(bytes.to_vec()).unwrap() }
}

async fn ids(app: &Router<SharedStore>) -> Vec<String> {
    call(app, Method::GET, "/movies", "")
        .await
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn welcome_is_plain_text() {
    let reply = call(&app(), Method::GET, "/", "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(reply.body, "Welcome to the movies server! Please use Postman to test the server.");
}

#[tokio::test]
async fn list_returns_seed_movies_byte_for_byte() {
    let reply = call(&app(), Method::GET, "/movies", "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        reply.body,
        concat!(
            r#"[{"id":"1","isbn":"12345","title":"Inception","director":{"firstname":"Christopher","lastname":"Nolan"}},"#,
            r#"{"id":"2","isbn":"2","title":"RRR","director":{"firstname":"Rajamouli","lastname":"SS"}}]"#,
            "\n",
        )
    );
}

#[tokio::test]
async fn repeated_list_is_identical() {
    let app = app();
    let first = call(&app, Method::GET, "/movies", "").await.body;
    let second = call(&app, Method::GET, "/movies", "").await.body;
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_by_id_returns_bare_movie() {
    let reply = call(&app(), Method::GET, "/movies/2", "").await;
    assert_eq!(
        reply.json(),
        json!({"id":"2","isbn":"2","title":"RRR","director":{"firstname":"Rajamouli","lastname":"SS"}})
    );
}

#[tokio::test]
async fn unknown_id_is_invalid_with_200() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let reply = call(&app, method.clone(), "/movies/404", r#"{"title":"x"}"#).await;
        assert_eq!(reply.status, StatusCode::OK, "{method}");
        assert_eq!(reply.content_type.as_deref(), Some("application/json"));
        assert_eq!(reply.body, "{\"message\":\"Invalid Id\"}\n", "{method}");
    }
    assert_eq!(ids(&app).await, ["1", "2"]);
}

#[tokio::test]
async fn create_appends_and_is_retrievable() {
    let app = app();
    let body = r#"{"id":"3","isbn":"9","title":"Dune","director":{"firstname":"Denis","lastname":"V"}}"#;

    let reply = call(&app, Method::POST, "/movies", body).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({"message":"Movie created","movie":serde_json::from_str::<Value>(body).unwrap()})
    );

    assert_eq!(ids(&app).await, ["1", "2", "3"]);
    let fetched = call(&app, Method::GET, "/movies/3", "").await;
    assert_eq!(fetched.body, format!("{body}\n"));
}

#[tokio::test]
async fn create_with_malformed_body_stores_zero_movie() {
    let app = app();
    let reply = call(&app, Method::POST, "/movies", "{not json").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({"message":"Movie created","movie":{"id":"","isbn":"","title":"","director":null}})
    );
    assert_eq!(ids(&app).await, ["1", "2", ""]);
}

#[tokio::test]
async fn create_with_empty_body_stores_zero_movie() {
    let app = app();
    let reply = call(&app, Method::POST, "/movies", "").await;
    assert_eq!(reply.json()["movie"], json!({"id":"","isbn":"","title":"","director":null}));
}

#[tokio::test]
async fn duplicate_ids_resolve_to_first_created() {
    let app = app();
    call(&app, Method::POST, "/movies", r#"{"id":"x","title":"first"}"#).await;
    call(&app, Method::POST, "/movies", r#"{"id":"x","title":"second"}"#).await;

    assert_eq!(ids(&app).await, ["1", "2", "x", "x"]);
    let fetched = call(&app, Method::GET, "/movies/x", "").await;
    assert_eq!(fetched.json()["title"], "first");
}

#[tokio::test]
async fn ids_with_reserved_characters_are_reachable_when_encoded() {
    let app = app();
    call(&app, Method::POST, "/movies", r#"{"id":"a b","title":"Spaced"}"#).await;

    let fetched = call(&app, Method::GET, "/movies/a%20b", "").await;
    assert_eq!(fetched.json(), json!({"id":"a b","isbn":"","title":"Spaced","director":null}));

    let deleted = call(&app, Method::DELETE, "/movies/a%20b", "").await;
    assert_eq!(deleted.json()["message"], "Movie deleted");

    let gone = call(&app, Method::GET, "/movies/a%20b", "").await;
    assert_eq!(gone.body, "{\"message\":\"Invalid Id\"}\n");
}

#[tokio::test]
async fn create_accepts_keys_in_any_case() {
    let app = app();
    let reply = call(&app, Method::POST, "/movies", r#"{"ID":"7","Title":"Heat","ISBN":"55"}"#).await;
    assert_eq!(
        reply.json()["movie"],
        json!({"id":"7","isbn":"55","title":"Heat","director":null})
    );

    let fetched = call(&app, Method::GET, "/movies/7", "").await;
    assert_eq!(fetched.json()["title"], "Heat");
}

#[tokio::test]
async fn update_with_repeated_key_keeps_last_value() {
    let app = app();
    call(&app, Method::PUT, "/movies/1", r#"{"title":"A","isbn":"9","title":"B"}"#).await;

    let fetched = call(&app, Method::GET, "/movies/1", "").await;
    assert_eq!(
        fetched.json(),
        json!({"id":"1","isbn":"9","title":"B","director":null})
    );
}

#[tokio::test]
async fn update_replaces_fields_but_keeps_id() {
    let app = app();
    let reply = call(
        &app,
        Method::PUT,
        "/movies/1",
        r#"{"title":"Inception 2","isbn":"999","director":null}"#,
    )
    .await;
    assert_eq!(
        reply.json(),
        json!({
            "message":"Movie updated",
            "movie":{"id":"","isbn":"999","title":"Inception 2","director":null}
        })
    );

    let fetched = call(&app, Method::GET, "/movies/1", "").await;
    assert_eq!(
        fetched.json(),
        json!({"id":"1","isbn":"999","title":"Inception 2","director":null})
    );
}

#[tokio::test]
async fn update_echoes_patch_id_without_applying_it() {
    let app = app();
    let reply = call(&app, Method::PUT, "/movies/2", r#"{"id":"42","title":"RRR 2"}"#).await;
    assert_eq!(reply.json()["movie"]["id"], "42");

    assert_eq!(ids(&app).await, ["1", "2"]);
    let fetched = call(&app, Method::GET, "/movies/2", "").await;
    assert_eq!(
        fetched.json(),
        json!({"id":"2","isbn":"","title":"RRR 2","director":null})
    );
}

#[tokio::test]
async fn delete_removes_once() {
    let app = app();
    let reply = call(&app, Method::DELETE, "/movies/1", "").await;
    assert_eq!(
        reply.json(),
        json!({
            "message":"Movie deleted",
            "movie":{"id":"1","isbn":"12345","title":"Inception","director":{"firstname":"Christopher","lastname":"Nolan"}}
        })
    );
    assert_eq!(ids(&app).await, ["2"]);

    let again = call(&app, Method::DELETE, "/movies/1", "").await;
    assert_eq!(again.body, "{\"message\":\"Invalid Id\"}\n");
}

#[tokio::test]
async fn emptied_store_lists_empty_array() {
    let app = app();
    call(&app, Method::DELETE, "/movies/1", "").await;
    call(&app, Method::DELETE, "/movies/2", "").await;
    let reply = call(&app, Method::GET, "/movies", "").await;
    assert_eq!(reply.body, "[]\n");
}

#[tokio::test]
async fn html_characters_are_escaped_in_responses() {
    let app = app();
    call(&app, Method::POST, "/movies", r#"{"id":"h","title":"Tom & Jerry <3"}"#).await;
    let fetched = call(&app, Method::GET, "/movies/h", "").await;
    assert!(fetched.body.contains(r#""title":"Tom \u0026 Jerry \u003c3""#));
    assert_eq!(fetched.json()["title"], "Tom & Jerry <3");
}

#[tokio::test]
async fn unrouted_requests_follow_router_defaults() {
    let app = app();

    let missing = call(&app, Method::GET, "/films", "").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, "404 page not found\n");

    let wrong_method = call(&app, Method::PATCH, "/movies/1", "").await;
    assert_eq!(wrong_method.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(wrong_method.body.is_empty());

    let collection_delete = call(&app, Method::DELETE, "/movies", "").await;
    assert_eq!(collection_delete.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_endpoints() {
    let app = app();
    let live = call(&app, Method::GET, "/healthz", "").await;
    assert_eq!(live.body, "ok");

    call(&app, Method::POST, "/movies", r#"{"id":"3"}"#).await;
    let ready = call(&app, Method::GET, "/readyz", "").await;
    assert_eq!(ready.json(), json!({"status":"ready","movies":3}));
}

#[tokio::test]
async fn concurrent_creates_are_all_stored() {
    let app = Arc::new(app());
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..32 {
        let app = Arc::clone(&app);
        tasks.spawn(async move {
            call(&app, Method::POST, "/movies", &format!(r#"{{"id":"c{i}"}}"#)).await
        });
    }
    while let Some(reply) = tasks.join_next().await {
        assert_eq!(reply.unwrap().status, StatusCode::OK);
    }
    assert_eq!(ids(&app).await.len(), 34);
}
