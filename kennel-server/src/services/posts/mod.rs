pub mod posts_service;
pub mod posts_shared;

pub use posts_service::PostsService;

pub const SERVICE_NAME: &str = "post";
