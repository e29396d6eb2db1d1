use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::fare::estimate_fare;
use crate::error::AppError;
use crate::models::location::Location;
use crate::models::ride::FareEstimate;
use crate::state::AppState;
use crate::tariff::{tariff_mode_at, TariffMode, BASE_FARE_DH};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tariff", get(current_tariff))
        .route("/fares/estimate", post(estimate))
}

/// Pair of catalog ids, shared by fare estimation and booking.
#[derive(Deserialize)]
pub struct RouteRequest {
    pub departure_id: String,
    pub destination_id: String,
}

#[derive(Serialize)]
pub struct TariffResponse {
    pub mode: TariffMode,
    pub local_hour: u32,
    pub base_fare_dh: f64,
    pub per_km_rate_dh: f64,
}

#[derive(Serialize)]
pub struct FareQuote {
    pub departure: Location,
    pub destination: Location,
    pub estimate: FareEstimate,
    pub tariff_mode: TariffMode,
    pub price_dh: f64,
}

async fn current_tariff(State(state): State<Arc<AppState>>) -> Json<TariffResponse> {
    let now = state.clock.now();
    let mode = tariff_mode_at(&now);

    Json(TariffResponse {
        mode,
        local_hour: now.hour(),
        base_fare_dh: BASE_FARE_DH,
        per_km_rate_dh: mode.per_km_rate(),
    })
}

async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RouteRequest>,
) -> Result<Json<FareQuote>, AppError> {
    let departure = state.locations.require(&payload.departure_id)?;
    let destination = state.locations.require(&payload.destination_id)?;

    let estimate = estimate_fare(departure, destination);
    let tariff_mode = tariff_mode_at(&state.clock.now());
    state.metrics.fare_estimates_total.inc();

    debug!(
        departure = %departure.id,
        destination = %destination.id,
        distance_km = estimate.distance_km,
        "fare estimated"
    );

    Ok(Json(FareQuote {
        departure: departure.clone(),
        destination: destination.clone(),
        estimate,
        tariff_mode,
        price_dh: estimate.price_for(tariff_mode),
    }))
}
