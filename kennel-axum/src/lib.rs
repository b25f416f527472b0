//! kennel-axum: Axum adapter for Kennel.
//!
//! Mounts Kennel services as REST routes and turns their errors into
//! the uniform 422 `{loc, msg, type}` response.

pub mod app;
pub mod params;
pub mod rest;
pub mod state;
mod error;
pub use error::KennelAxumError;
pub use state::KennelAxumState;

pub use app::{axum, KennelAxum, REQUEST_ID_HEADER};
