use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use kennel_core::hooks::{HookContext, KennelAfterHook, KennelBeforeHook, KennelErrorHook};
use kennel_core::KennelApp;
use serde_json::Value;

use crate::services::KennelParams;

pub struct LogBefore;

#[async_trait]
impl KennelBeforeHook<Value, KennelParams> for LogBefore {
    async fn run(&self, ctx: &mut HookContext<Value, KennelParams>) -> Result<()> {
        tracing::debug!(
            service = %ctx.service_name,
            method = ctx.method.as_str(),
            http_method = %ctx.params.method,
            path = %ctx.params.path,
            request_id = ctx.params.request_id.as_deref().unwrap_or("-"),
            "-> call"
        );
        Ok(())
    }
}

pub struct LogAfter;

#[async_trait]
impl KennelAfterHook<Value, KennelParams> for LogAfter {
    async fn run(&self, ctx: &mut HookContext<Value, KennelParams>) -> Result<()> {
        tracing::debug!(service = %ctx.service_name, method = ctx.method.as_str(), "<- ok");
        Ok(())
    }
}

pub struct LogError;

#[async_trait]
impl KennelErrorHook<Value, KennelParams> for LogError {
    async fn run(&self, ctx: &mut HookContext<Value, KennelParams>) -> Result<()> {
        if let Some(err) = &ctx.error {
            tracing::warn!(
                service = %ctx.service_name,
                method = ctx.method.as_str(),
                request_id = ctx.params.request_id.as_deref().unwrap_or("-"),
                error = %err,
                "<- failed"
            );
        }
        Ok(())
    }
}

pub fn global_hooks(app: &KennelApp<Value, KennelParams>) {
    app.hooks(|h| {
        h.before_all(Arc::new(LogBefore));
        h.after_all(Arc::new(LogAfter));
        h.error_all(Arc::new(LogError));
    });
}
