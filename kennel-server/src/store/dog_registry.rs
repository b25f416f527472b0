use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::models::{Dog, DogKind};

use super::error::RegistryError;

/// Dogs keyed by `pk`. Iteration is in key order.
#[derive(Debug, Default)]
pub struct DogRegistry {
    dogs: RwLock<BTreeMap<i64, Dog>>,
}

impl DogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each dog is keyed by its own `pk`; a later duplicate replaces an
    /// earlier one.
    pub fn with_dogs<I>(dogs: I) -> Self
    where
        I: IntoIterator<Item = Dog>,
    {
        let map = dogs.into_iter().map(|dog| (dog.pk, dog)).collect();
        Self {
            dogs: RwLock::new(map),
        }
    }

    pub async fn list(&self, kind: Option<DogKind>) -> Vec<Dog> {
        let dogs = self.dogs.read().await;
        dogs.values()
            .filter(|dog| kind.map_or(true, |k| dog.kind == k))
            .cloned()
            .collect()
    }

    /// Check and insert happen under one write lock.
    pub async fn insert(&self, dog: Dog) -> Result<Dog, RegistryError> {
        let mut dogs = self.dogs.write().await;
        if dogs.contains_key(&dog.pk) {
            return Err(RegistryError::Conflict(dog.pk));
        }
        dogs.insert(dog.pk, dog.clone());
        Ok(dog)
    }

    pub async fn get(&self, pk: i64) -> Result<Dog, RegistryError> {
        let dogs = self.dogs.read().await;
        dogs.get(&pk).cloned().ok_or(RegistryError::NotFound(pk))
    }

    /// Full replacement of the record at `pk`. The stored record always
    /// carries `pk`, whatever the payload said.
    pub async fn replace(&self, pk: i64, mut dog: Dog) -> Result<Dog, RegistryError> {
        let mut dogs = self.dogs.write().await;
        let Some(slot) = dogs.get_mut(&pk) else {
            return Err(RegistryError::NotFound(pk));
        };
        dog.pk = pk;
        *slot = dog.clone();
        Ok(dog)
    }

    pub async fn len(&self) -> usize {
        self.dogs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.dogs.read().await.is_empty()
    }
}
