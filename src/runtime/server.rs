//! Server mode
//!
//! Configures and runs the HTTP server, then drains it gracefully on
//! shutdown signals with a bounded timeout.

use std::time::Duration;

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::warn;

use crate::api::services::shorten::json_error_handler;
use crate::api::services::{AppStartTime, health_routes, redirect_routes, shorten_routes};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server until a shutdown signal arrives.
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // Prepare server startup (storage connection, shortener)
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            anyhow::anyhow!(e)
        })?;

    let shortener = startup.shortener.clone();
    let config = get_config();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(shortener.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(shorten_routes())
            .service(health_routes())
            .service(redirect_routes())
    })
    .keep_alive(Duration::from_secs(30))
    .shutdown_timeout(config.server.shutdown_timeout)
    .disable_signals()
    .bind(&bind_address)?
    .run();

    // Drive graceful shutdown from our own signal listener so SIGTERM and
    // SIGINT behave the same: stop accepting, drain within the timeout.
    let handle = server.handle();
    tokio::spawn(async move {
        lifetime::shutdown::listen_for_shutdown().await;
        handle.stop(true).await;
    });

    server.await?;
    warn!("Server stopped");

    Ok(())
}
