use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use kennel_core::bail_kennel;
use kennel_core::errors::KennelError;
use kennel_core::{KennelService, ServiceCapabilities};
use serde_json::Value;

use crate::models::Dog;
use crate::services::KennelParams;
use crate::store::KennelStore;

use super::{dogs_shared, DogParams};

pub struct DogsService {
    pub store: Arc<KennelStore>,
}

impl DogsService {
    pub fn new(store: Arc<KennelStore>) -> Self {
        Self { store }
    }
}

fn parse_pk(id: &str) -> Result<i64> {
    match id.trim().parse::<i64>() {
        Ok(pk) => Ok(pk),
        Err(_) => {
            bail_kennel!(validation, "pk", "pk must be an integer");
        }
    }
}

/// The payload has already been validated and canonicalized by the
/// `ValidateDogPayload` hook.
fn from_value(data: Value) -> Result<Dog> {
    serde_json::from_value(data).map_err(|e| kennel_schema::body_error(e.to_string()))
}

fn to_value(dog: &Dog) -> Result<Value> {
    Ok(serde_json::to_value(dog)?)
}

#[async_trait]
impl KennelService<Value, KennelParams> for DogsService {
    fn capabilities(&self) -> ServiceCapabilities {
        dogs_shared::crud_capabilities()
    }

    async fn find(&self, params: KennelParams) -> Result<Vec<Value>> {
        let DogParams { kind } = DogParams::try_from(&params)?;
        let dogs = self.store.dogs.list(kind).await;
        dogs.iter().map(to_value).collect()
    }

    async fn get(&self, id: &str, _params: KennelParams) -> Result<Value> {
        let pk = parse_pk(id)?;
        let dog = self.store.dogs.get(pk).await.map_err(|err| {
            KennelError::not_found("pk", format!("Oops! No dog with pk {pk} in database."))
                .with_source(err.into())
                .into_anyhow()
        })?;
        to_value(&dog)
    }

    async fn create(&self, data: Value, _params: KennelParams) -> Result<Value> {
        let dog = from_value(data)?;
        let dog = self.store.dogs.insert(dog).await.map_err(|err| {
            KennelError::conflict("pk", "Oops! The specified PK already exists.")
                .with_source(err.into())
                .into_anyhow()
        })?;

        tracing::info!(pk = dog.pk, kind = %dog.kind, "dog created");
        to_value(&dog)
    }

    /// Path pk wins over the payload's own `pk`.
    async fn update(&self, id: &str, data: Value, _params: KennelParams) -> Result<Value> {
        let pk = parse_pk(id)?;
        let dog = from_value(data)?;
        if dog.pk != pk {
            tracing::debug!(pk, payload_pk = dog.pk, "payload pk ignored on update");
        }

        let dog = self.store.dogs.replace(pk, dog).await.map_err(|err| {
            KennelError::not_found("pk", format!("Oops! No dogs with PK {pk} in database."))
                .with_source(err.into())
                .into_anyhow()
        })?;

        tracing::info!(pk, kind = %dog.kind, "dog updated");
        to_value(&dog)
    }
}
