use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use kennel_server::app::base_app;
use kennel_server::build_from;
use kennel_server::store::KennelStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    build_from(base_app(), Arc::new(KennelStore::seeded()))
        .unwrap()
        .into_router()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn send(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn root_is_successful_response() {
    let res = router().oneshot(get("/")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!("Successful Response"));
}

#[tokio::test]
async fn lists_seeded_dogs_in_key_order() {
    let res = router().oneshot(get("/dog")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(
        names(&body),
        vec!["Bob", "Marli", "Snoopy", "Rex", "Pongo", "Tillman", "Uga"]
    );
    assert_eq!(body[0], json!({"name": "Bob", "pk": 0, "kind": "terrier"}));
}

#[tokio::test]
async fn kind_filter_returns_only_that_kind() {
    let app = router();

    for (kind, expected) in [
        ("terrier", vec!["Bob"]),
        ("bulldog", vec!["Marli", "Tillman", "Uga"]),
        ("dalmatian", vec!["Snoopy", "Rex", "Pongo"]),
    ] {
        let res = app
            .clone()
            .oneshot(get(&format!("/dog?kind={kind}")))
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200);

        let body = json_body(res).await;
        assert_eq!(names(&body), expected);
        assert!(body.as_array().unwrap().iter().all(|d| d["kind"] == kind));
    }
}

#[tokio::test]
async fn unknown_kind_is_422() {
    let res = router().oneshot(get("/dog?kind=poodle")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(
        json_body(res).await,
        json!({"loc": "kind", "msg": "Oops! No dog breed poodle in database.", "type": "error"})
    );
}

#[tokio::test]
async fn get_one_dog() {
    let res = router().oneshot(get("/dog/3")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!({"name": "Rex", "pk": 3, "kind": "dalmatian"}));
}

#[tokio::test]
async fn missing_dog_is_422() {
    let res = router().oneshot(get("/dog/42")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(
        json_body(res).await,
        json!({"loc": "pk", "msg": "Oops! No dog with pk 42 in database.", "type": "error"})
    );
}

#[tokio::test]
async fn non_integer_pk_is_422() {
    let res = router().oneshot(get("/dog/rex")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    let body = json_body(res).await;
    assert_eq!(body["loc"], "pk");
    assert_eq!(body["type"], "error");
}

#[tokio::test]
async fn undecodable_pk_is_reported_against_pk() {
    let app = router();

    let res = app.clone().oneshot(get("/dog/%FF")).await.unwrap();
    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(
        json_body(res).await,
        json!({"loc": "pk", "msg": "pk must be an integer", "type": "error"})
    );

    let res = app
        .oneshot(send("PATCH", "/dog/%FF", json!({"name": "Rex", "pk": 3, "kind": "dalmatian"})))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(json_body(res).await["loc"], "pk");
}

#[tokio::test]
async fn create_with_taken_pk_is_422() {
    let app = router();
    let res = app
        .clone()
        .oneshot(send("POST", "/dog", json!({"name": "Copy", "pk": 0, "kind": "terrier"})))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(
        json_body(res).await,
        json!({"loc": "pk", "msg": "Oops! The specified PK already exists.", "type": "error"})
    );

    let res = app.oneshot(get("/dog/0")).await.unwrap();
    assert_eq!(json_body(res).await["name"], "Bob");
}

#[tokio::test]
async fn create_then_get() {
    let app = router();
    let dog = json!({"name": "Lassie", "pk": 100, "kind": "terrier"});

    let res = app.clone().oneshot(send("POST", "/dog", dog.clone())).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, dog);

    let res = app.clone().oneshot(get("/dog/100")).await.unwrap();
    assert_eq!(json_body(res).await, dog);

    let res = app.oneshot(get("/dog?kind=terrier")).await.unwrap();
    assert_eq!(names(&json_body(res).await), vec!["Bob", "Lassie"]);
}

#[tokio::test]
async fn create_with_bad_payload_is_422() {
    let app = router();

    let res = app
        .clone()
        .oneshot(send("POST", "/dog", json!({"name": "Fifi", "pk": 8, "kind": "poodle"})))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(json_body(res).await["loc"], "body");

    let res = app
        .clone()
        .oneshot(send("POST", "/dog", json!({"name": "", "pk": 8, "kind": "terrier"})))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(json_body(res).await["loc"], "name");

    let res = app.oneshot(get("/dog/8")).await.unwrap();
    assert_eq!(res.status().as_u16(), 422);
}

#[tokio::test]
async fn malformed_json_is_422_with_request_id() {
    let res = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dog")
                .header("content-type", "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert!(res.headers().get("x-request-id").is_some());
    let body = json_body(res).await;
    assert_eq!(body["loc"], "body");
    assert_eq!(body["type"], "error");
}

#[tokio::test]
async fn patch_missing_dog_is_422() {
    let res = router()
        .oneshot(send("PATCH", "/dog/42", json!({"name": "Ghost", "pk": 42, "kind": "terrier"})))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert_eq!(
        json_body(res).await,
        json!({"loc": "pk", "msg": "Oops! No dogs with PK 42 in database.", "type": "error"})
    );
}

#[tokio::test]
async fn patch_replaces_the_whole_record() {
    let app = router();

    let res = app
        .clone()
        .oneshot(send("PATCH", "/dog/1", json!({"name": "Marley", "pk": 1, "kind": "terrier"})))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!({"name": "Marley", "pk": 1, "kind": "terrier"}));

    let res = app.clone().oneshot(get("/dog/1")).await.unwrap();
    assert_eq!(json_body(res).await, json!({"name": "Marley", "pk": 1, "kind": "terrier"}));

    let res = app.oneshot(get("/dog?kind=bulldog")).await.unwrap();
    assert_eq!(names(&json_body(res).await), vec!["Tillman", "Uga"]);
}

#[tokio::test]
async fn patch_keeps_the_path_pk() {
    let app = router();

    let res = app
        .clone()
        .oneshot(send("PATCH", "/dog/2", json!({"name": "Spot", "pk": 77, "kind": "dalmatian"})))
        .await
        .unwrap();
    assert_eq!(json_body(res).await["pk"], 2);

    let res = app.clone().oneshot(get("/dog/2")).await.unwrap();
    assert_eq!(json_body(res).await["name"], "Spot");

    let res = app.oneshot(get("/dog/77")).await.unwrap();
    assert_eq!(res.status().as_u16(), 422);
}

#[tokio::test]
async fn posts_append_after_the_seeded_entries() {
    let app = router();

    let res = app.clone().oneshot(send("POST", "/post", json!({}))).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let first = json_body(res).await;
    assert_eq!(first["id"], 2);
    assert!(first["timestamp"].as_i64().unwrap() > 0);

    let res = app
        .oneshot(Request::builder().method("POST").uri("/post").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = json_body(res).await;
    assert_eq!(second["id"], 3);
    assert!(second["timestamp"].as_i64() >= first["timestamp"].as_i64());
}

#[tokio::test]
async fn post_body_is_never_read() {
    let res = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/post")
                .header("content-type", "text/plain")
                .body(Body::from("hello"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await["id"], 2);
}

#[tokio::test]
async fn post_log_exposes_only_append() {
    let app = router();

    let res = app.clone().oneshot(get("/post")).await.unwrap();
    assert_eq!(res.status().as_u16(), 405);

    let res = app.oneshot(get("/post/1")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
