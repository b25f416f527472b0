use std::sync::Arc;

use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use http_body_util::BodyExt;
use kennel_axum::KennelAxum;
use kennel_core::errors::KennelError;
use kennel_core::{KennelApp, KennelService, ServiceCapabilities, ServiceMethodKind};
use serde_json::{json, Value};
use tower::ServiceExt;

struct ConflictOnCreate;

#[async_trait::async_trait]
impl KennelService<Value, ()> for ConflictOnCreate {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create])
    }

    async fn create(&self, _data: Value, _params: ()) -> anyhow::Result<Value> {
        Err(KennelError::conflict("pk", "Oops! The specified PK already exists.").into_anyhow())
    }
}

struct BoomOnCreate;

#[async_trait::async_trait]
impl KennelService<Value, ()> for BoomOnCreate {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create])
    }

    async fn create(&self, _data: Value, _params: ()) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("boom"))
    }
}

/// Echoes the body back; treats an empty body as `null`.
struct EchoCreate;

#[async_trait::async_trait]
impl KennelService<Value, ()> for EchoCreate {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create])
    }

    async fn create(&self, data: Value, _params: ()) -> anyhow::Result<Value> {
        Ok(json!({"received": data}))
    }
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn malformed_json_is_422_with_uniform_shape() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = kennel_axum::axum(app)
        .use_service("/things", Arc::new(BoomOnCreate))
        .into_router();

    let res = router.oneshot(post("/things", "{\"name\":\"x\"")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    assert!(res.headers().get("x-request-id").is_some());
    let body = json_body(res).await;
    assert_eq!(body["loc"], "body");
    assert_eq!(body["type"], "error");
    assert!(body["msg"].as_str().unwrap().starts_with("Failed to parse"));
}

#[tokio::test]
async fn request_id_is_preserved_when_provided() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = KennelAxum::new(app)
        .use_service("/things", Arc::new(EchoCreate))
        .into_router();

    let provided = HeaderValue::from_static("req-test-123");
    let mut req = post("/things", "{}");
    req.headers_mut().insert("x-request-id", provided.clone());

    let res = router.oneshot(req).await.unwrap();

    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}

#[tokio::test]
async fn kennel_error_keeps_422_and_shape() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = KennelAxum::new(app)
        .use_service("/things", Arc::new(ConflictOnCreate))
        .into_router();

    let res = router.oneshot(post("/things", "{}")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    let body = json_body(res).await;
    assert_eq!(
        body,
        json!({"loc": "pk", "msg": "Oops! The specified PK already exists.", "type": "error"})
    );
}

#[tokio::test]
async fn foreign_error_maps_to_500_general() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = KennelAxum::new(app)
        .use_service("/things", Arc::new(BoomOnCreate))
        .into_router();

    let res = router.oneshot(post("/things", "{}")).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["loc"], "server");
    assert_eq!(body["type"], "error");
    assert_eq!(body["msg"], "boom");
}

#[tokio::test]
async fn empty_body_reaches_service_as_null() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = KennelAxum::new(app)
        .use_service("/things", Arc::new(EchoCreate))
        .into_router();

    let res = router
        .oneshot(Request::builder().method("POST").uri("/things").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!({"received": null}));
}

#[tokio::test]
async fn only_allowed_methods_are_mounted() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = KennelAxum::new(app)
        .use_service("/things", Arc::new(EchoCreate))
        .into_router();

    let res = router
        .clone()
        .oneshot(Request::builder().method("GET").uri("/things").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 405);

    let res = router
        .oneshot(Request::builder().method("GET").uri("/things/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
