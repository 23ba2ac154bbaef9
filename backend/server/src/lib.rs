//! Documentation of a self-hosted software directory.
//!
//!
//!
//! # General Infrastructure
//! - Frontend pages talk to this service over JSON
//! - Service talks to a document store, in-memory for development or redis for deployments
//! - Sign-in happens with the identity provider in the browser, admin calls forward a bearer token
//! - Only one store handle per process, shared by every request
//!
//!
//!
//! # Routes
//!
//! ## Public
//! - `GET /software?q=`: featured + regular approved listings, optionally searched
//! - `GET /software/{id}`: one approved listing
//! - `POST /software`: submit a listing, answers with where the submitter goes next
//! - `GET /categories`: category vocabulary
//! - `GET /categories/{id}/software`: approved listings in a category, newest first
//!
//! ## Admin
//! - `GET /admin/software`: every listing, newest first
//! - `GET /admin/software/{id}`: one listing, any status
//! - `PUT /admin/software/{id}/status`: approve, reject or disable
//! - `PUT /admin/software/{id}/featured`: feature or unfeature
//! - `POST /admin/fixtures`: insert demonstration listings
//!
//! Admin mutations answer with the reloaded listing collection.
//!
//!
//!
//! # Notes
//!
//! ## Listing Lifecycle
//! New submissions are pending and not featured, whatever plan was picked. Pending goes to
//! approved or rejected, approved goes to disabled. Rejected and disabled stay put. Featured can
//! be flipped at any time and is never cleared by a status change.
//!
//! ## Front Page Query
//! Featured and regular listings are loaded without store-side ordering and sorted in process.
//! Cheap while the directory holds a few thousand rows, revisit before it grows past that.
//!
//!
//!
//! # Setup
//!
//! Run with the in-memory store and demonstration data.
//! ```sh
//! SEED_FIXTURES=true RUST_LOG=info cargo run -p directory
//! ```
//!
//! Run against redis.
//! ```sh
//! STORE_URL=redis://127.0.0.1:6379 cargo run -p directory
//! ```
//!
//! Seed a redis store once.
//! ```sh
//! cargo run -p seed -- --store-url redis://127.0.0.1:6379 --if-empty
//! ```
use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header::AUTHORIZATION, header::CONTENT_TYPE},
    routing::{get, post, put},
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod admin;
pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod repository;
pub mod routes;
pub mod search;
pub mod state;
pub mod submission;
pub mod utils;

use config::Config;
use routes::{
    admin_featured_handler, admin_fixtures_handler, admin_list_handler, admin_listing_handler,
    admin_status_handler, browse_handler, categories_handler, category_listings_handler,
    listing_handler, submit_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(state.config.cors_max_age);

    Router::new()
        .route("/software", get(browse_handler).post(submit_handler))
        .route("/software/{id}", get(listing_handler))
        .route("/categories", get(categories_handler))
        .route("/categories/{id}/software", get(category_listings_handler))
        .route("/admin/software", get(admin_list_handler))
        .route("/admin/software/{id}", get(admin_listing_handler))
        .route("/admin/software/{id}/status", put(admin_status_handler))
        .route("/admin/software/{id}/featured", put(admin_featured_handler))
        .route("/admin/fixtures", post(admin_fixtures_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
