//! A small dog registry and post log served over HTTP.
//!
//! `build()` wires the seeded store into a `KennelAxum` router; `main`
//! only adds logging and a listener on top.

pub mod app;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use anyhow::Result;
use axum::Json;
use kennel_axum::KennelAxum;
use kennel_core::KennelApp;
use serde_json::Value;

use crate::services::KennelParams;
use crate::store::KennelStore;

pub use app::kennel_app;

async fn root() -> Json<&'static str> {
    Json("Successful Response")
}

/// The full app over the seeded store, configured from the environment.
pub fn build() -> Result<KennelAxum<Value, KennelParams>> {
    build_from(kennel_app(), Arc::new(KennelStore::seeded()))
}

pub fn build_from(
    app: KennelApp<Value, KennelParams>,
    store: Arc<KennelStore>,
) -> Result<KennelAxum<Value, KennelParams>> {
    hooks::global_hooks(&app);
    let svcs = services::configure(&app, store)?;

    let ax = KennelAxum::new(app)
        .use_get("/", root)
        .use_service("/dog", svcs.dogs)
        .use_service("/post", svcs.posts);

    Ok(ax)
}
