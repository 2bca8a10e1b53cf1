use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{CatalogRepository, MemoryCatalog, Seed};
use tracing::{info, warn};

use crate::auth::{ServerAuthConfig, ServerState};
use crate::errors::StartupError;
use crate::routes;

/// Assemble shared state from configuration: seed, catalog and auth secret.
pub fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let seed = Seed::from_config(&cfg.seed).map_err(StartupError::InvalidSeed)?;
    let seeded = cfg.seed.load_on_startup && !seed.is_empty();
    info!(
        seed_categories = cfg.seed.categories.len(),
        seed_items = cfg.seed.items.len(),
        load_on_startup = cfg.seed.load_on_startup,
        "seed data loaded"
    );

    let catalog: Arc<dyn CatalogRepository> = if seeded {
        MemoryCatalog::seeded(seed)
    } else {
        MemoryCatalog::new(seed)
    };

    if cfg.auth.uses_default_password() {
        warn!("admin password is the built-in default; set ADMIN_PASSWORD or auth.admin_password");
    }

    Ok(ServerState {
        catalog,
        auth: ServerAuthConfig { admin_password: cfg.auth.admin_password.clone() },
    })
}

pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg)?;
    Ok(routes::build_router(state, routes::build_cors()))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse().map_err(|source| StartupError::BindAddr { addr, source })
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;
    let addr = bind_addr(&cfg)?;

    info!(%addr, "starting catalog admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server drained");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
