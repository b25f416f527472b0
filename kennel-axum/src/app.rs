use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use axum::Router;
use kennel_core::KennelApp;
use kennel_core::KennelService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::params::FromRestParams;
use crate::rest;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A KennelApp plus the axum routes its services are mounted on.
pub struct KennelAxum<R, P = ()>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub app: Arc<KennelApp<R, P>>,
    router: Router<()>,
}

impl<R, P> Clone for KennelAxum<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            router: self.router.clone(),
        }
    }
}

impl<R, P> KennelAxum<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub fn new(app: KennelApp<R, P>) -> Self {
        Self {
            app: Arc::new(app),
            router: Router::new(),
        }
    }

    /// A plain GET route outside any service (`/`, health checks).
    pub fn use_get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Register `service` under the path's name and mount its REST routes.
    pub fn use_service(mut self, path: &str, service: Arc<dyn KennelService<R, P>>) -> Self
    where
        R: Serialize + DeserializeOwned,
        P: FromRestParams,
    {
        let name = path.trim_start_matches('/');
        let capabilities = service.capabilities();
        self.app.register_service(name, service);

        tracing::debug!(
            service = name,
            methods = ?capabilities.allowed_methods,
            "mounting service"
        );

        let router = rest::service_router(Arc::from(name), Arc::clone(&self.app), &capabilities);
        self.router = self.router.nest(path, router);
        self
    }

    /// The finished router: request ids are assigned (or kept when the
    /// client sent one), traced, and echoed back on the response.
    pub fn into_router(self) -> Router {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        self.router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}

pub fn axum<R, P>(app: KennelApp<R, P>) -> KennelAxum<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    KennelAxum::new(app)
}
