use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::rest::fares::RouteRequest;
use crate::engine::booking::book_ride;
use crate::engine::fare::estimate_fare;
use crate::engine::receipt::{progress_event, receipt_text};
use crate::error::AppError;
use crate::models::ride::{ActiveRide, CompletedRide, RideProgressView};
use crate::state::AppState;
use crate::tariff::current_tariff_mode;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rides", post(create_ride))
        .route("/rides/active", get(get_active_ride))
        .route("/rides/active/advance", post(advance_active_ride))
        .route("/rides/active/complete", post(complete_active_ride))
        .route("/rides/active/cancel", post(cancel_active_ride))
        .route("/rides/history", get(list_history))
        .route("/rides/history/:id/receipt", get(get_receipt))
}

#[derive(Deserialize)]
pub struct AdvanceRequest {
    pub elapsed_seconds: f64,
}

async fn create_ride(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RouteRequest>,
) -> Result<Json<ActiveRide>, AppError> {
    let departure = state.locations.require(&payload.departure_id)?;
    let destination = state.locations.require(&payload.destination_id)?;

    let estimate = estimate_fare(departure, destination);
    let tariff_mode = current_tariff_mode(state.clock.as_ref());
    let created_at = state.clock.now().with_timezone(&Utc);

    let record = book_ride(
        departure,
        destination,
        estimate.price_for(tariff_mode),
        tariff_mode,
        created_at,
    )?;
    let driver = state.driver_picker.pick(&state.drivers);

    let active = {
        let mut session = state.session.lock().await;
        let active = session.start(record, driver)?.clone();
        state
            .metrics
            .active_ride_progress_percent
            .set(active.view.progress_percent);
        active
    };

    state
        .metrics
        .rides_booked_total
        .with_label_values(&[tariff_mode.as_str()])
        .inc();

    info!(
        ride_id = %active.record.id,
        departure = %active.record.departure.id,
        destination = %active.record.destination.id,
        price_dh = active.record.price_dh,
        tariff = tariff_mode.as_str(),
        "ride booked"
    );

    Ok(Json(active))
}

async fn get_active_ride(State(state): State<Arc<AppState>>) -> Result<Json<ActiveRide>, AppError> {
    let session = state.session.lock().await;
    let active = session
        .active()
        .ok_or_else(|| AppError::NotFound("no active ride".to_string()))?;

    Ok(Json(active.clone()))
}

async fn advance_active_ride(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdvanceRequest>,
) -> Result<Json<RideProgressView>, AppError> {
    let mut session = state.session.lock().await;
    let view = session.advance_to(payload.elapsed_seconds)?;
    let active = session
        .active()
        .ok_or_else(|| AppError::Internal("active ride vanished".to_string()))?;

    // Published under the session lock so an end-of-ride cannot slip in between.
    state
        .metrics
        .active_ride_progress_percent
        .set(view.progress_percent);
    state.publish(progress_event(active));
    drop(session);

    Ok(Json(view))
}

async fn complete_active_ride(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompletedRide>, AppError> {
    let completed_at = state.clock.now().with_timezone(&Utc);
    let mut session = state.session.lock().await;
    let entry = session.complete_ride(completed_at)?;
    state.metrics.active_ride_progress_percent.set(0.0);
    drop(session);

    state
        .metrics
        .rides_ended_total
        .with_label_values(&["completed"])
        .inc();
    state.metrics.ride_fare_dh.observe(entry.final_price_dh);

    info!(
        ride_id = %entry.ride.id,
        final_price_dh = entry.final_price_dh,
        duration_seconds = entry.duration_seconds,
        "ride completed"
    );

    Ok(Json(entry))
}

async fn cancel_active_ride(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    let mut session = state.session.lock().await;
    let record = session.cancel_ride()?;
    state.metrics.active_ride_progress_percent.set(0.0);
    drop(session);

    state
        .metrics
        .rides_ended_total
        .with_label_values(&["cancelled"])
        .inc();

    info!(ride_id = %record.id, "ride cancelled");

    Ok(StatusCode::NO_CONTENT)
}

async fn list_history(State(state): State<Arc<AppState>>) -> Json<Vec<CompletedRide>> {
    let session = state.session.lock().await;
    Json(session.history().to_vec())
}

async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<String, AppError> {
    let session = state.session.lock().await;
    let entry = session
        .find_completed(id)
        .ok_or_else(|| AppError::NotFound(format!("completed ride {id} not found")))?;

    Ok(receipt_text(entry))
}
