//! tryline-admin - association administration service
//!
//! HTTP backend for the Tryline admin console: seasons, cohorts,
//! locations, position types, previous-level rankings, invitations, and
//! wave/session planning. Athlete balancing itself runs in the separate
//! balancing service; this binary only orchestrates it.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tryline_admin::services::DistributionClient;
use tryline_admin::{build_router, AppState};
use tryline_common::config;

/// Command-line arguments for tryline-admin
#[derive(Parser, Debug)]
#[command(name = "tryline-admin")]
#[command(about = "Association administration service for Tryline")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "TRYLINE_PORT")]
    port: Option<u16>,

    /// Data folder holding tryline.db
    #[arg(short, long, env = "TRYLINE_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Tryline Admin (tryline-admin) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let toml_config = config::load_toml_config()?;
    let data_dir = config::resolve_data_dir(args.data_dir.as_deref(), &toml_config);
    let db_path = config::prepare_data_dir(&data_dir)?;
    info!("Database path: {}", db_path.display());

    let pool = match tryline_common::db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let distribution = DistributionClient::new(&toml_config.balancing)
        .map_err(|e| anyhow::anyhow!("Failed to build balancing client: {}", e))?;
    info!("Balancing service: {}", toml_config.balancing.base_url);

    // Create application state and router
    let state = AppState::new(pool, distribution);
    let app = build_router(state);

    let port = args.port.unwrap_or(toml_config.server.port);
    let bind_addr = format!("{}:{}", toml_config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("tryline-admin listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
