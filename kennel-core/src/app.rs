use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;

use crate::errors::KennelError;
use crate::hooks::collect_method_hooks;
use crate::{
    HookContext, HookResult, KennelAfterHook, KennelBeforeHook, KennelConfig,
    KennelConfigSnapshot, KennelErrorHook, KennelService, KennelServiceRegistry,
    ServiceCapabilities, ServiceHooks, ServiceMethodKind,
};

struct KennelAppInner<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    registry: RwLock<KennelServiceRegistry<R, P>>,
    global_hooks: RwLock<ServiceHooks<R, P>>,
    service_hooks: RwLock<HashMap<String, ServiceHooks<R, P>>>,
    config: RwLock<KennelConfig>,
}

/// KennelApp is the central application container.
///
/// Framework-agnostic. Holds:
/// - service registry
/// - app hooks
/// - per-service hooks
/// - config
pub struct KennelApp<R, P = ()>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    inner: Arc<KennelAppInner<R, P>>,
}

type HooksForMethod<R, P> = (
    Vec<Arc<dyn KennelBeforeHook<R, P>>>,
    Vec<Arc<dyn KennelAfterHook<R, P>>>,
    Vec<Arc<dyn KennelErrorHook<R, P>>>,
);

impl<R, P> Default for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> Clone for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(KennelAppInner {
                registry: RwLock::new(KennelServiceRegistry::new()),
                global_hooks: RwLock::new(ServiceHooks::new()),
                service_hooks: RwLock::new(HashMap::new()),
                config: RwLock::new(KennelConfig::new()),
            }),
        }
    }

    pub fn register_service<S>(&self, name: S, service: Arc<dyn KennelService<R, P>>)
    where
        S: Into<String>,
    {
        let name = name.into();
        tracing::debug!(service = %name, "service registered");
        self.inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(name, service);
    }

    /// App-wide hooks, run before any service hooks.
    pub fn hooks<F>(&self, f: F)
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        let mut g = self
            .inner
            .global_hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut g);
    }

    pub(crate) fn configure_service_hooks<F>(&self, service_name: &str, f: F)
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        let mut map = self
            .inner
            .service_hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let hooks = map.entry(service_name.to_string()).or_default();
        f(hooks);
    }

    /// Look up a registered service.
    pub fn service(&self, name: &str) -> Result<ServiceHandle<R, P>> {
        let svc = self
            .inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| {
                KennelError::general(format!("Service not found: {name}")).into_anyhow()
            })?;

        Ok(ServiceHandle {
            app: self.clone(),
            name: name.to_string(),
            service: svc,
        })
    }

    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.get(key).map(|v| v.to_string())
    }

    /// Mutate the config in place (bulk loaders, env overrides).
    pub fn configure<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut KennelConfig) -> T,
    {
        let mut cfg = self.inner.config.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut cfg)
    }

    pub fn config_snapshot(&self) -> KennelConfigSnapshot {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.snapshot()
    }
}

/// A named service plus the app it lives in; calls go through the hook
/// pipeline.
pub struct ServiceHandle<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    app: KennelApp<R, P>,
    name: String,
    service: Arc<dyn KennelService<R, P>>,
}

impl<R, P> ServiceHandle<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn hooks<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        self.app.configure_service_hooks(&self.name, f);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> ServiceCapabilities {
        self.service.capabilities()
    }

    /// Global hooks first, then service hooks.
    fn collect_hooks_for_method(&self, method: &ServiceMethodKind) -> HooksForMethod<R, P> {
        let g = self
            .app
            .inner
            .global_hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let map = self
            .app
            .inner
            .service_hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut before = collect_method_hooks(&g.before_all, &g.before_by_method, method);
        let mut after = g.after_all.clone();
        let mut error = g.error_all.clone();

        if let Some(h) = map.get(&self.name) {
            before.extend(collect_method_hooks(&h.before_all, &h.before_by_method, method));
            after.extend(h.after_all.iter().cloned());
            error.extend(h.error_all.iter().cloned());
        }

        (before, after, error)
    }

    fn context(&self, method: ServiceMethodKind, params: P) -> HookContext<R, P> {
        HookContext::new(self.name.clone(), method, params, self.app.config_snapshot())
    }

    /// before → service call → after; error hooks on failure.
    async fn run_pipeline(&self, mut ctx: HookContext<R, P>) -> Result<HookContext<R, P>> {
        let (before, after, error) = self.collect_hooks_for_method(&ctx.method);

        let res = self.run_stages(&before, &after, &mut ctx).await;

        if let Err(e) = res {
            ctx.error = Some(e);

            for h in &error {
                if let Err(hook_err) = h.run(&mut ctx).await {
                    tracing::warn!(service = %self.name, error = %hook_err, "error hook failed");
                }
            }

            // An error hook may have cleared the error and set a result.
            if let Some(err) = ctx.error.take() {
                return Err(err);
            }
        }

        Ok(ctx)
    }

    async fn run_stages(
        &self,
        before: &[Arc<dyn KennelBeforeHook<R, P>>],
        after: &[Arc<dyn KennelAfterHook<R, P>>],
        ctx: &mut HookContext<R, P>,
    ) -> Result<()> {
        for h in before {
            h.run(ctx).await?;
        }

        self.dispatch(ctx).await?;

        for h in after {
            h.run(ctx).await?;
        }

        Ok(())
    }

    /// Sets `ctx.result`.
    async fn dispatch(&self, ctx: &mut HookContext<R, P>) -> Result<()> {
        let method = ctx.method;
        match method {
            ServiceMethodKind::Find => {
                let records = self.service.find(ctx.params.clone()).await?;
                ctx.result = Some(HookResult::Many(records));
            }
            ServiceMethodKind::Get => {
                let id = require_id(ctx)?;
                let record = self.service.get(&id, ctx.params.clone()).await?;
                ctx.result = Some(HookResult::One(record));
            }
            ServiceMethodKind::Create => {
                let data = require_data(ctx)?;
                let created = self.service.create(data, ctx.params.clone()).await?;
                ctx.result = Some(HookResult::One(created));
            }
            ServiceMethodKind::Update => {
                let id = require_id(ctx)?;
                let data = require_data(ctx)?;
                let updated = self.service.update(&id, data, ctx.params.clone()).await?;
                ctx.result = Some(HookResult::One(updated));
            }
        }
        Ok(())
    }

    pub async fn find(&self, params: P) -> Result<Vec<R>> {
        let ctx = self.context(ServiceMethodKind::Find, params);
        let ctx = self.run_pipeline(ctx).await?;

        match ctx.result {
            Some(HookResult::Many(v)) => Ok(v),
            Some(HookResult::One(_)) => Err(anyhow::anyhow!(
                "find() produced HookResult::One unexpectedly"
            )),
            None => Ok(vec![]),
        }
    }

    pub async fn get(&self, id: &str, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Get, params);
        ctx.id = Some(id.to_string());
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx, "get")
    }

    pub async fn create(&self, data: R, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Create, params);
        ctx.data = Some(data);
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx, "create")
    }

    pub async fn update(&self, id: &str, data: R, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Update, params);
        ctx.id = Some(id.to_string());
        ctx.data = Some(data);
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx, "update")
    }
}

fn require_id<R, P>(ctx: &HookContext<R, P>) -> Result<String> {
    ctx.id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("{}() requires ctx.id", ctx.method.as_str()))
}

fn require_data<R, P>(ctx: &mut HookContext<R, P>) -> Result<R> {
    let method = ctx.method;
    ctx.data
        .take()
        .ok_or_else(|| anyhow::anyhow!("{}() requires ctx.data", method.as_str()))
}

fn expect_one<R, P>(ctx: HookContext<R, P>, method: &str) -> Result<R> {
    match ctx.result {
        Some(HookResult::One(v)) => Ok(v),
        Some(HookResult::Many(_)) => Err(anyhow::anyhow!(
            "{method}() produced HookResult::Many unexpectedly"
        )),
        None => Err(anyhow::anyhow!("{method}() produced no result")),
    }
}
