//! Portfolio server - serves the rendered page and runs per-visitor sessions.

mod routes;
mod session;
mod sse;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use portfolio::core::invariants::check_content;
use portfolio::io::init::SitePaths;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::state::{AppState, Site};

#[derive(Parser)]
#[command(name = "portfolio-ui")]
#[command(about = "Live server for the portfolio page")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Project directory (contains .portfolio/)
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Directory with static assets such as the hero image (defaults to ./public)
    #[arg(long)]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_ui=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let project_dir = args.project_dir.canonicalize().unwrap_or(args.project_dir);
    info!(project_dir = %project_dir.display(), "starting portfolio-ui");

    let paths = SitePaths::new(&project_dir);
    let site = Site::load(&paths)?;
    for problem in check_content(&site.content) {
        warn!(problem = %problem, "content problem");
    }
    let state = AppState::new(paths, site);

    // Re-render when config or content changes
    sse::start_file_watcher(state.clone());
    // Drop sessions whose page went away without closing them
    session::start_session_sweeper(state.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .merge(routes::page_router())
        .nest("/api", routes::api_router())
        .route("/events", get(sse::events_handler))
        .layer(cors)
        .with_state(state);

    let assets_dir = args
        .assets_dir
        .unwrap_or_else(|| project_dir.join("public"));

    if assets_dir.exists() {
        info!(assets_dir = %assets_dir.display(), "serving static assets");
        app = app.fallback_service(ServeDir::new(assets_dir));
    } else {
        info!(
            assets_dir = %assets_dir.display(),
            "assets directory not found, page-only mode"
        );
    }

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
