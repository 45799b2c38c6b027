mod compiler;
mod config;
mod document;
mod errors;
mod generation;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::LatexCompiler;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvpress v{}", env!("CARGO_PKG_VERSION"));

    // The template is re-read per request; a missing file is only a warning here.
    if config.template_path.is_file() {
        info!("Template: {}", config.template_path.display());
    } else {
        warn!(
            "Template {} not found; /generate-cv will fail until it exists",
            config.template_path.display()
        );
    }

    let compiler = LatexCompiler::new(&config.latex_bin, config.latex_timeout);
    info!(
        "LaTeX compiler: {} (timeout {}s)",
        config.latex_bin,
        config.latex_timeout.as_secs()
    );

    let state = AppState {
        config: config.clone(),
        compiler: Arc::new(compiler),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
