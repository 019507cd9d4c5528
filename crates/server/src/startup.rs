use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::new()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Migrate the schema, seed the bootstrap admin and assemble the router.
pub async fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<Router> {
    models::db::migrate(&db).await?;
    let state = ServerState::new(db, cfg);
    if state.users.ensure_default_admin(&cfg.bootstrap).await? {
        info!(event = "admin_seeded", username = %cfg.bootstrap.username, "bootstrap admin created");
    } else if !state.users.is_default_admin_exists(&cfg.bootstrap).await? {
        warn!(username = %cfg.bootstrap.username, "bootstrap username belongs to a regular account");
    }
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; serving until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "draining connections");
}

/// Connect, build the app and serve until Ctrl+C. Logging must already be
/// initialised by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let app = build_app(db, &cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, base_url = %cfg.site.base_url, "starting blog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
