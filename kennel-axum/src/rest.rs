use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::rejection::{BytesRejection, PathRejection, QueryRejection},
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, Uri},
    routing::MethodRouter,
    Json, Router,
};
use kennel_core::errors::KennelError;
use kennel_core::{KennelApp, ServiceCapabilities, ServiceMethodKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    params::{FromRestParams, RestParams},
    KennelAxumError, KennelAxumState,
};

type QueryMap = HashMap<String, String>;

fn map_query_rejection(rejection: QueryRejection) -> KennelAxumError {
    KennelError::validation("query", rejection.body_text()).into()
}

fn map_path_rejection(rejection: PathRejection) -> KennelAxumError {
    KennelError::validation("path", rejection.body_text()).into()
}

fn map_body_rejection(rejection: BytesRejection) -> KennelAxumError {
    KennelError::validation("body", rejection.body_text()).into()
}

/// An id that `Path` cannot decode (not valid UTF-8 once unescaped) still
/// reaches the service as the raw segment, so the service reports it
/// against its own key.
fn path_id(
    id: Result<Path<String>, PathRejection>,
    uri: &Uri,
) -> Result<String, KennelAxumError> {
    let rejection = match id {
        Ok(Path(id)) => return Ok(id),
        Err(rejection) => rejection,
    };

    if matches!(rejection, PathRejection::FailedToDeserializePathParams(_)) {
        if let Some(raw) = uri.path().rsplit('/').next().filter(|s| !s.is_empty()) {
            return Ok(raw.to_string());
        }
    }
    Err(map_path_rejection(rejection))
}

/// An empty body reads as JSON `null`, so services that take no input
/// (an append, a counter) can be called with a bare POST.
fn parse_body<R: DeserializeOwned>(body: &Bytes) -> Result<R, KennelAxumError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body.as_ref()
    };

    serde_json::from_slice(raw).map_err(|e| {
        KennelError::validation("body", format!("Failed to parse the request body as JSON: {e}"))
            .into()
    })
}

fn read_body<R: DeserializeOwned>(
    capabilities: &ServiceCapabilities,
    body: Result<Bytes, BytesRejection>,
) -> Result<R, KennelAxumError> {
    if capabilities.ignores_body {
        return parse_body(&Bytes::new());
    }
    let body = body.map_err(map_body_rejection)?;
    parse_body(&body)
}

fn rest_params<P: FromRestParams>(
    headers: &HeaderMap,
    query: QueryMap,
    method: &str,
    uri: &Uri,
) -> P {
    P::from_rest_params(RestParams::from_parts(headers, query, method, uri))
}

async fn find<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<QueryMap>, QueryRejection>,
) -> Result<Json<Vec<R>>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Query(query) = query.map_err(map_query_rejection)?;
    let params = rest_params::<P>(&headers, query, "GET", &uri);

    let svc = state.app.service(&state.service_name)?;
    let res = svc.find(params).await?;
    Ok(Json(res))
}

async fn create<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<QueryMap>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Query(query) = query.map_err(map_query_rejection)?;
    let svc = state.app.service(&state.service_name)?;
    let data: R = read_body(&svc.capabilities(), body)?;
    let params = rest_params::<P>(&headers, query, "POST", &uri);

    let res = svc.create(data, params).await?;
    Ok(Json(res))
}

async fn get<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<QueryMap>, QueryRejection>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Query(query) = query.map_err(map_query_rejection)?;
    let id = path_id(id, &uri)?;
    let params = rest_params::<P>(&headers, query, "GET", &uri);

    let svc = state.app.service(&state.service_name)?;
    let res = svc.get(&id, params).await?;
    Ok(Json(res))
}

/// PATCH carries a full replacement record and is served by `update`.
async fn update<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<QueryMap>, QueryRejection>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Query(query) = query.map_err(map_query_rejection)?;
    let id = path_id(id, &uri)?;
    let svc = state.app.service(&state.service_name)?;
    let data: R = read_body(&svc.capabilities(), body)?;
    let params = rest_params::<P>(&headers, query, "PATCH", &uri);

    let res = svc.update(&id, data, params).await?;
    Ok(Json(res))
}

/// Routes for one service, limited to what its capabilities allow:
///
/// - `GET /`      → find
/// - `POST /`     → create
/// - `GET /{id}`  → get
/// - `PATCH /{id}` → update
pub fn service_router<R, P>(
    service_name: Arc<str>,
    app: Arc<KennelApp<R, P>>,
    capabilities: &ServiceCapabilities,
) -> Router<()>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let state = KennelAxumState::new(app, service_name);

    let mut collection: MethodRouter<KennelAxumState<R, P>> = MethodRouter::new();
    let mut mounted_collection = false;
    if capabilities.allows(ServiceMethodKind::Find) {
        collection = collection.get(find::<R, P>);
        mounted_collection = true;
    }
    if capabilities.allows(ServiceMethodKind::Create) {
        collection = collection.post(create::<R, P>);
        mounted_collection = true;
    }

    let mut item: MethodRouter<KennelAxumState<R, P>> = MethodRouter::new();
    let mut mounted_item = false;
    if capabilities.allows(ServiceMethodKind::Get) {
        item = item.get(get::<R, P>);
        mounted_item = true;
    }
    if capabilities.allows(ServiceMethodKind::Update) {
        item = item.patch(update::<R, P>);
        mounted_item = true;
    }

    let mut router = Router::new();
    if mounted_collection {
        router = router.route("/", collection);
    }
    if mounted_item {
        router = router.route("/{id}", item);
    }

    router.with_state(state)
}
