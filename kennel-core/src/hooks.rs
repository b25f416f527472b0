use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::{KennelConfigSnapshot, ServiceMethodKind};

/// What a service call produced.
#[derive(Debug, Clone)]
pub enum HookResult<R> {
    One(R),
    Many(Vec<R>),
}

/// Context passed to hooks.
///
/// R = record type
/// P = params type (query, headers, etc.)
pub struct HookContext<R, P> {
    pub service_name: String,
    pub method: ServiceMethodKind,
    pub params: P,
    pub id: Option<String>,
    pub data: Option<R>,               // input payload (create/update)
    pub result: Option<HookResult<R>>, // output (after hooks)
    pub error: Option<anyhow::Error>,  // error (error hooks)
    pub config: KennelConfigSnapshot,
}

impl<R, P> HookContext<R, P> {
    pub fn new(
        service_name: impl Into<String>,
        method: ServiceMethodKind,
        params: P,
        config: KennelConfigSnapshot,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            method,
            params,
            id: None,
            data: None,
            result: None,
            error: None,
            config,
        }
    }
}

#[async_trait]
pub trait KennelBeforeHook<R, P>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

#[async_trait]
pub trait KennelAfterHook<R, P>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

/// Error hooks see `ctx.error` and may replace or clear it.
#[async_trait]
pub trait KennelErrorHook<R, P>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

type HookMap<H> = HashMap<ServiceMethodKind, Vec<Arc<H>>>;

/// Hooks registered either app-wide or for one service.
pub struct ServiceHooks<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    pub(crate) before_all: Vec<Arc<dyn KennelBeforeHook<R, P>>>,
    pub(crate) before_by_method: HookMap<dyn KennelBeforeHook<R, P>>,
    pub(crate) after_all: Vec<Arc<dyn KennelAfterHook<R, P>>>,
    pub(crate) error_all: Vec<Arc<dyn KennelErrorHook<R, P>>>,
}

impl<R, P> Default for ServiceHooks<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> ServiceHooks<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            before_all: Vec::new(),
            before_by_method: HashMap::new(),
            after_all: Vec::new(),
            error_all: Vec::new(),
        }
    }

    pub fn before_all(&mut self, hook: Arc<dyn KennelBeforeHook<R, P>>) -> &mut Self {
        self.before_all.push(hook);
        self
    }

    pub fn before(
        &mut self,
        method: ServiceMethodKind,
        hook: Arc<dyn KennelBeforeHook<R, P>>,
    ) -> &mut Self {
        self.before_by_method.entry(method).or_default().push(hook);
        self
    }

    pub fn before_create(&mut self, hook: Arc<dyn KennelBeforeHook<R, P>>) -> &mut Self {
        self.before(ServiceMethodKind::Create, hook)
    }

    pub fn before_update(&mut self, hook: Arc<dyn KennelBeforeHook<R, P>>) -> &mut Self {
        self.before(ServiceMethodKind::Update, hook)
    }

    pub fn after_all(&mut self, hook: Arc<dyn KennelAfterHook<R, P>>) -> &mut Self {
        self.after_all.push(hook);
        self
    }

    pub fn error_all(&mut self, hook: Arc<dyn KennelErrorHook<R, P>>) -> &mut Self {
        self.error_all.push(hook);
        self
    }
}

/// `*_all` hooks first, then the ones registered for `method`.
pub(crate) fn collect_method_hooks<H: ?Sized>(
    all: &[Arc<H>],
    by_method: &HookMap<H>,
    method: &ServiceMethodKind,
) -> Vec<Arc<H>> {
    let mut out: Vec<Arc<H>> = all.to_vec();
    if let Some(hooks) = by_method.get(method) {
        out.extend(hooks.iter().cloned());
    }
    out
}
