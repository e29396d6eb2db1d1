use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use taxi_ride::api;
use taxi_ride::clock::SystemClock;
use taxi_ride::config::Config;
use taxi_ride::engine::ticker::run_ride_ticker;
use taxi_ride::error::AppError;
use taxi_ride::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let clock = SystemClock::new(config.utc_offset()?);
    let shared_state = Arc::new(AppState::new(config.event_buffer_size, Arc::new(clock)));

    let app = api::rest::router(shared_state.clone());

    tokio::spawn(run_ride_ticker(
        shared_state.clone(),
        config.tick_interval(),
        config.playback_speed,
    ));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        utc_offset_hours = config.utc_offset_hours,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
