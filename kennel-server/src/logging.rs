use anyhow::{anyhow, Context, Result};
use kennel_core::KennelConfigSnapshot;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise the `log.level` config key, then `info`.
pub fn init_tracing(config: &KennelConfigSnapshot) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = config.get("log.level").unwrap_or("info").trim();
            EnvFilter::try_new(level).with_context(|| format!("invalid log.level: {level}"))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("tracing already initialised: {e}"))
}
