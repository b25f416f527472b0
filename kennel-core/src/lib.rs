//! kennel-core: framework-agnostic core for the Kennel service.

pub mod app;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod registry;
pub mod service;

pub use app::{KennelApp, ServiceHandle};
pub use config::{KennelConfig, KennelConfigSnapshot};
pub use errors::{ErrorKind, KennelError, KennelResult};
pub use hooks::{
    HookContext, HookResult, KennelAfterHook, KennelBeforeHook, KennelErrorHook, ServiceHooks,
};
pub use registry::KennelServiceRegistry;
pub use service::{KennelService, ServiceCapabilities, ServiceMethodKind};
