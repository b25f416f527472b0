use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Standard service methods: find, get, create, update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Update,
}

impl ServiceMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find => "find",
            ServiceMethodKind::Get => "get",
            ServiceMethodKind::Create => "create",
            ServiceMethodKind::Update => "update",
        }
    }
}

/// Capabilities describe which methods a service wants to expose
/// to the outside world.
///
/// The REST adapter mounts only the routes a service allows. A service
/// that `ignores_body` gets `null` as its payload whatever was sent.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
    pub ignores_body: bool,
}

impl ServiceCapabilities {
    /// find, get, create, update
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Update],
            ignores_body: false,
        }
    }

    /// Helper for building from a list.
    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
            ignores_body: false,
        }
    }

    pub fn ignoring_body(mut self) -> Self {
        self.ignores_body = true;
        self
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

/// Core Kennel service trait:
///
/// - `find`   → list/query many
/// - `get`    → fetch one by id
/// - `create` → create one
/// - `update` → full replace
///
/// All methods have default implementations that return
/// "Method not implemented", so a service can override only
/// what it actually supports.
#[async_trait]
pub trait KennelService<R, P = ()>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    /// Describe which methods this service wants to expose.
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    /// Find many records (optionally filtered by params).
    async fn find(&self, _params: P) -> Result<Vec<R>> {
        Err(anyhow!("Method not implemented: find"))
    }

    /// Get a single record by id.
    async fn get(&self, _id: &str, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: get"))
    }

    /// Create a new record.
    async fn create(&self, _data: R, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: create"))
    }

    /// Fully replace an existing record.
    async fn update(&self, _id: &str, _data: R, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: update"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_report_allowed_methods() {
        let caps = ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create]);
        assert!(caps.allows(ServiceMethodKind::Create));
        assert!(!caps.allows(ServiceMethodKind::Find));
        assert!(ServiceCapabilities::standard_crud().allows(ServiceMethodKind::Update));
        assert!(!caps.ignores_body);
        assert!(caps.ignoring_body().ignores_body);
    }
}
