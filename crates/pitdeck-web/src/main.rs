use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

mod handlers;
mod state;
mod template;

use state::AppState;

/// Serve a card site directory to pitdeck editors: the card document, the
/// face template, styling and artwork, plus a save endpoint.
#[derive(Parser, Debug)]
#[command(name = "pitdeck-web", version, about)]
struct Args {
    /// Site directory holding cards.json, templates/, css/, card_images/
    #[arg(long, default_value = "site")]
    site: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !args.site.is_dir() {
        anyhow::bail!("site directory not found: {}", args.site.display());
    }
    let cards_path = args.site.join("cards.json");
    if !cards_path.is_file() {
        eprintln!(
            "Warning: {} does not exist yet; it will be created on first save",
            cards_path.display()
        );
    }

    let state = Arc::new(AppState {
        site_dir: args.site.clone(),
        cards_path: cards_path.clone(),
    });

    // Print sheets exported by the editor open in a browser and pull fonts
    // and artwork from here cross-origin.
    let cors = CorsLayer::permissive();

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        // Alias kept for old bookmarks.
        .route("/edit.html", axum::routing::get(handlers::index::index))
        .route("/save_cards", axum::routing::post(handlers::save::save_cards))
        .route_service("/cards.json", ServeFile::new(cards_path))
        .nest_service("/templates", ServeDir::new(args.site.join("templates")))
        .nest_service("/css", ServeDir::new(args.site.join("css")))
        .nest_service("/card_images", ServeDir::new(args.site.join("card_images")))
        .nest_service("/fonts", ServeDir::new(args.site.join("fonts")))
        .layer(cors)
        .with_state(state);

    println!("Serving site from: {}", args.site.display());
    let addr = args.listen;
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
