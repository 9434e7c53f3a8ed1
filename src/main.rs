//! dailydiet server
//!
//! Tracks meals and whether they fit a diet, per anonymous user identified
//! by the `userId` session cookie.
//!
//! # Configuration
//!
//! Environment variables (override the config file):
//! - `DAILYDIET_PORT`: Port to listen on (default: 3333)
//! - `DAILYDIET_DATABASE_PATH`: SQLite database file (default: ~/.local/share/dailydiet/dailydiet.db)
//! - `DAILYDIET_ENV`: Environment name reported by `GET /` (default: development)
//!
//! # Endpoints
//!
//! - `GET /`: Liveness check
//! - `POST /users`: Register and receive a session cookie
//! - `GET|POST /meals`, `GET|PUT|DELETE /meals/{id}`: Meal CRUD (session required)
//! - `GET /meals/metrics`: Diet metrics (session required)

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod models;
mod server;

use config::Config;
use server::AppState;

#[derive(Parser)]
#[command(name = "dailydiet")]
#[command(version)]
#[command(about = "Meal and diet tracking HTTP service", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and environment)
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dailydiet=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!("Database: {}", config.database_path.display());
    let pool = db::init_db(&config.database_path).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = server::app(AppState::new(pool, config));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
