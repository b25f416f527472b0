use std::sync::Arc;

use anyhow::{Context, Result};
use kennel_server::app::{DEFAULT_HOST, DEFAULT_PORT};
use kennel_server::logging::init_tracing;
use kennel_server::store::KennelStore;

#[tokio::main]
async fn main() -> Result<()> {
    let app = kennel_server::kennel_app();
    let config = app.config_snapshot();
    init_tracing(&config)?;

    let host = config
        .get_string("http.host")
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match config.get("http.port") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid http.port: {raw}"))?,
        None => DEFAULT_PORT,
    };

    let ax = kennel_server::build_from(app, Arc::new(KennelStore::seeded()))?;

    tracing::info!(%host, port, "starting kennel-server");
    ax.listen((host.as_str(), port)).await
}
