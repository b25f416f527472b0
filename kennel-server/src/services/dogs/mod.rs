pub mod dog_params;
pub mod dogs_hooks;
pub mod dogs_schema;
pub mod dogs_service;
pub mod dogs_shared;

pub use dog_params::DogParams;
pub use dogs_service::DogsService;

pub const SERVICE_NAME: &str = "dog";
