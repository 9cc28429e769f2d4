use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, routing::get, Router};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

mod access_log;
mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod seed;
mod store;
mod validation;

use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state. Cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ProductStore>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional local overrides for HOST / PORT / PRODUCTS_FILE
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,products_api=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let store = seed::load_store(&config.products_file)?;
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::homepage))
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .layer(middleware::from_fn(access_log::access_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
