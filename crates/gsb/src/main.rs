use std::sync::Arc;

use anyhow::Context;

use gsb_core::{commands::Router, config::Config, ports::GroupStore};
use gsb_postgres::PgGroupStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gsb_core::logging::init("gsb")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };
    tracing::debug!(config = ?cfg, "configuration loaded");

    let store = PgGroupStore::connect(&cfg)
        .await
        .context("failed to connect to the database")?;
    store
        .ensure_schema()
        .await
        .context("failed to create the groups table")?;

    let router = Arc::new(Router::new(Arc::new(store)));

    tracing::info!("group directory bot starting");
    gsb_telegram::router::run_polling(cfg, router)
        .await
        .context("telegram bot failed")?;

    Ok(())
}
