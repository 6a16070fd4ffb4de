#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the indicações dashboard.
//!
//! Serves the dashboard dataset as JSON with aggressive cache-defeating
//! headers, applies the search/filter engine when a `q` parameter is
//! present, and serves the static frontend files. The dataset file is
//! re-read on every data request so an external batch job can replace it
//! between requests without a restart; the last good copy is retained when
//! a re-read fails.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use indicacoes_data::DatasetStore;
use indicacoes_query::FilterCache;

/// Default location of the batch job's output file.
pub const DEFAULT_DATA_PATH: &str = "public/dashboard_data.json";

/// Shared application state.
pub struct AppState {
    /// Last-good dataset store backed by the JSON file.
    pub store: Arc<DatasetStore>,
    /// Memoized filtered views, keyed by dataset generation and query.
    pub cache: FilterCache,
}

/// Starts the dashboard API server.
///
/// Reads `DASHBOARD_DATA_PATH`, `STATIC_DIR`, `BIND_ADDR`, and `PORT` from
/// the environment. The initial dataset load is attempted eagerly but a
/// failure only logs a warning; data requests keep retrying the file until
/// it appears.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path =
        std::env::var("DASHBOARD_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

    log::info!("Loading dashboard data from {data_path}...");
    let store = Arc::new(DatasetStore::new(&data_path));
    match store.reload() {
        Ok(data) => log::info!(
            "Loaded {} indicações across {} categories",
            data.metadata.total_indicacoes,
            data.metadata.total_categorias
        ),
        Err(e) => log::warn!("Initial dataset load failed, will retry per request: {e}"),
    }

    let state = web::Data::new(AppState {
        store,
        cache: FilterCache::default(),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/dashboard-data", web::get().to(handlers::dashboard_data))
                    .route("/data", web::get().to(handlers::data)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
