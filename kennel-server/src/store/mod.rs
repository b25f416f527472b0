//! Process-local state. Built once at startup and shared with the
//! services through an `Arc`; nothing outside reaches the maps directly.

mod dog_registry;
mod error;
mod post_log;
mod seed;

pub use dog_registry::DogRegistry;
pub use error::RegistryError;
pub use post_log::PostLog;
pub use seed::{seed_dogs, seed_posts};

#[derive(Debug, Default)]
pub struct KennelStore {
    pub dogs: DogRegistry,
    pub posts: PostLog,
}

impl KennelStore {
    pub fn new(dogs: DogRegistry, posts: PostLog) -> Self {
        Self { dogs, posts }
    }

    /// The startup data: seven dogs and two post entries.
    pub fn seeded() -> Self {
        Self::new(
            DogRegistry::with_dogs(seed_dogs()),
            PostLog::with_entries(seed_posts()),
        )
    }
}
