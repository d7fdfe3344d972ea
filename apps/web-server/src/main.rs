use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use web_server::config::AppConfig;
use web_server::state::AppState;
use web_server::telemetry::{TelemetryConfig, init_telemetry};
use web_server::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill web server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::connect(&config)
        .await
        .map_err(std::io::Error::other)?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
