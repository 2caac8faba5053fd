//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        AppwriteAccountAdapter, AppwriteClient, AppwriteTablesAdapter, ChromeRasterizer,
        PinataAdapter,
    },
    config::Config,
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder().build()?;
    let appwrite = AppwriteClient::new(
        http.clone(),
        &config.appwrite.endpoint,
        &config.appwrite.project_id,
    );

    let papers = Arc::new(AppwriteTablesAdapter::new(
        appwrite.clone().with_api_key(&config.appwrite.api_key),
        &config.appwrite.database_id,
        &config.appwrite.collection_id,
    ));
    let identity = Arc::new(AppwriteAccountAdapter::new(
        appwrite.with_api_key(&config.appwrite.api_key),
    ));
    let pinning = Arc::new(PinataAdapter::new(
        http,
        &config.pinata.jwt,
        &config.pinata.upload_url,
    ));
    let rasterizer = Arc::new(ChromeRasterizer::new(config.chrome_window_width));
    info!(
        "Using database {} / table {}",
        config.appwrite.database_id, config.appwrite.collection_id
    );

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        papers,
        pinning,
        identity,
        rasterizer,
    });

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(api_lib::web::middleware::USER_ID_HEADER),
        ]);

    // --- 4. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
