use std::sync::Arc;

use kennel_core::{KennelApp, ServiceCapabilities, ServiceMethodKind};
use serde_json::Value;

use crate::services::KennelParams;

pub fn crud_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::from_methods(vec![
        ServiceMethodKind::Find,
        ServiceMethodKind::Get,
        ServiceMethodKind::Create,
        ServiceMethodKind::Update,
    ])
}

pub fn register_hooks(app: &KennelApp<Value, KennelParams>) -> anyhow::Result<()> {
    app.service(super::SERVICE_NAME)?.hooks(|h| {
        h.before_create(Arc::new(super::dogs_hooks::ValidateDogPayload));
        h.before_update(Arc::new(super::dogs_hooks::ValidateDogPayload));
    });
    Ok(())
}
