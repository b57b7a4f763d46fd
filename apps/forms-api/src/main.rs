//! Forms API Server
//!
//! REST backend for the form builder. Provides endpoints for:
//! - Building forms and templates (sections, fields, reordering)
//! - Publishing, closing and sharing forms by access key
//! - Collecting responses and per-user drafts
//! - Response summaries and dashboard counts
//!
//! All state lives in memory and is lost on restart.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod error;
mod handlers;
mod models;
mod routes;
mod state;

use state::AppState;

/// Command-line arguments for the forms API
#[derive(Parser, Debug)]
#[command(name = "forms-api")]
#[command(version, about = "HTTP API for building, publishing and answering forms")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Start with an empty store instead of the demo templates
    #[arg(long, env = "FORMS_NO_SEED")]
    no_seed: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env()
            .add_directive("forms_api=info".parse()?)
            .add_directive("form_core=info".parse()?)
            .add_directive("tower_http=debug".parse()?)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Initializing Forms API...");
    let state = Arc::new(AppState::new(!args.no_seed));
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Forms API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
