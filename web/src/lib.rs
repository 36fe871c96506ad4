use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE},
    HeaderValue, Method,
};
use log::*;
use tower_http::cors::CorsLayer;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod protect;
pub mod router;

pub async fn init_server(app_state: AppState) -> Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    let allowed_origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    info!("Allowed origins: {allowed_origins:?}");

    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE])
        .allow_credentials(true)
        .allow_origin(allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to address: {server_url}"));

    info!("Server starting... listening for connections on http://{server_url}");

    let router = router::define_routes(app_state).layer(cors_layer);

    axum::serve(listener, router).await.unwrap();

    Ok(())
}
