use std::sync::Arc;

use kennel_core::{KennelApp, KennelService};
use serde_json::Value;

use crate::store::KennelStore;

pub mod types;
pub use types::KennelParams;

pub mod dogs;
pub mod posts;

pub struct KennelServices {
    pub dogs: Arc<dyn KennelService<Value, KennelParams>>,
    pub posts: Arc<dyn KennelService<Value, KennelParams>>,
}

/// Register both services on `app` and install their hooks.
pub fn configure(
    app: &KennelApp<Value, KennelParams>,
    store: Arc<KennelStore>,
) -> anyhow::Result<KennelServices> {
    let dogs: Arc<dyn KennelService<Value, KennelParams>> =
        Arc::new(dogs::DogsService::new(Arc::clone(&store)));
    app.register_service(dogs::SERVICE_NAME, Arc::clone(&dogs));
    dogs::dogs_shared::register_hooks(app)?;

    let posts: Arc<dyn KennelService<Value, KennelParams>> =
        Arc::new(posts::PostsService::new(store));
    app.register_service(posts::SERVICE_NAME, Arc::clone(&posts));

    Ok(KennelServices { dogs, posts })
}
