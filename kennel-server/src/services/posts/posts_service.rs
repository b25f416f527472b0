use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use kennel_core::{KennelService, ServiceCapabilities};
use serde_json::Value;

use crate::services::KennelParams;
use crate::store::KennelStore;

use super::posts_shared;

pub struct PostsService {
    pub store: Arc<KennelStore>,
}

impl PostsService {
    pub fn new(store: Arc<KennelStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl KennelService<Value, KennelParams> for PostsService {
    fn capabilities(&self) -> ServiceCapabilities {
        posts_shared::append_capabilities()
    }

    /// Any request body is ignored.
    async fn create(&self, _data: Value, _params: KennelParams) -> Result<Value> {
        let entry = self.store.posts.append(Utc::now().timestamp()).await;
        tracing::info!(id = entry.id, timestamp = entry.timestamp, "post recorded");
        Ok(serde_json::to_value(entry)?)
    }
}
