use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::location::Coordinate;
use crate::models::taxi::{nearby_taxis, NearbyTaxi};
use crate::state::AppState;

/// Where the rider is assumed to stand when no position is given.
const DEFAULT_POSITION: Coordinate = Coordinate {
    latitude: 33.5731,
    longitude: -7.5898,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/taxis", get(list_nearby_taxis))
}

#[derive(Deserialize)]
pub struct PositionQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

async fn list_nearby_taxis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<Vec<NearbyTaxi>>, AppError> {
    let position = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude)?,
        (None, None) => DEFAULT_POSITION,
        _ => {
            return Err(AppError::InvalidInput(
                "latitude and longitude must be given together".to_string(),
            ))
        }
    };

    Ok(Json(nearby_taxis(&position, &state.taxis)))
}
