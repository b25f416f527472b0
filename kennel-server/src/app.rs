use kennel_core::KennelApp;
use serde_json::Value;

use crate::services::KennelParams;

/// Environment variables starting with this override config keys:
/// `KENNEL__HTTP__PORT=9000` sets `http.port`.
pub const ENV_PREFIX: &str = "KENNEL";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

fn apply_defaults(app: &KennelApp<Value, KennelParams>) {
    app.set("http.host", DEFAULT_HOST);
    app.set("http.port", DEFAULT_PORT.to_string());
    app.set("log.level", "info");
}

/// The app with its defaults, without looking at the environment.
pub fn base_app() -> KennelApp<Value, KennelParams> {
    let app = KennelApp::new();
    apply_defaults(&app);
    app
}

/// The app with its defaults and any `KENNEL__*` overrides applied.
pub fn kennel_app() -> KennelApp<Value, KennelParams> {
    let app = base_app();
    let applied = app.configure(|cfg| cfg.apply_env_overrides(ENV_PREFIX, std::env::vars()));
    if applied > 0 {
        tracing::debug!(applied, "config overrides from environment");
    }
    app
}
