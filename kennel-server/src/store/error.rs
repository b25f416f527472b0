use thiserror::Error;

/// Failures of the keyed dog registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("dog with pk {0} already exists")]
    Conflict(i64),

    #[error("no dog with pk {0}")]
    NotFound(i64),
}
