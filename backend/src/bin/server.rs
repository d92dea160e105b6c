//! Dashboard HTTP Server Binary
//!
//! This is the main entry point for the dashboard REST API server.
//! It loads configuration, seeds the default user, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dashboard-server
//!
//! JWT_SECRET=... PORT=8080 cargo run --bin dashboard-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `JWT_SECRET`: Secret used to sign session tokens (required unless set in dashboard.toml)
//! - `INDICATOR_BASE_URL`: Indicator source base URL (default: https://api.worldbank.org)
//! - `STATIC_DIR`: Directory with the browser client to serve
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use indicator_dashboard::auth::InMemoryUserDirectory;
use indicator_dashboard::config::AppConfig;
use indicator_dashboard::http::{create_router, AppState};
use indicator_dashboard::services::WorldBankClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting dashboard HTTP Server");

    let config = AppConfig::load()?;

    // Single default user so the dashboard can be tried out right away
    let users = InMemoryUserDirectory::new(config.auth.bcrypt_cost);
    users.add_user(config.auth.default_username.clone(), &config.auth.default_password)?;
    info!(
        "Default user created: username='{}', password='{}'",
        config.auth.default_username, config.auth.default_password
    );

    let source = WorldBankClient::new(config.indicators.clone())?;
    info!(
        "Indicator source: {} (countries {}, years {})",
        config.indicators.base_url,
        config.indicators.country_path(),
        config.indicators.date_range()
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    if let Some(dir) = &config.server.static_dir {
        info!("Serving browser client from {}", dir.display());
    }

    // Create application state and router
    let state = AppState::new(config, Arc::new(source), Arc::new(users));
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
