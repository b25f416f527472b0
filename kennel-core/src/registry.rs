use std::collections::HashMap;
use std::sync::Arc;

use crate::KennelService;

/// Maps service names to KennelService instances.
pub struct KennelServiceRegistry<R, P = ()>
where
    R: Send + 'static,
    P: Send + 'static,
{
    services: HashMap<String, Arc<dyn KennelService<R, P>>>,
}

impl<R, P> KennelServiceRegistry<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Register a service under a given name, replacing any previous one.
    pub fn register<S>(&mut self, name: S, service: Arc<dyn KennelService<R, P>>)
    where
        S: Into<String>,
    {
        self.services.insert(name.into(), service);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn KennelService<R, P>>> {
        self.services.get(name)
    }
}

impl<R, P> Default for KennelServiceRegistry<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
