use crate::geo::{distance_km, round_2dp};
use crate::models::location::Location;
use crate::models::ride::FareEstimate;
use crate::tariff::{TariffMode, BASE_FARE_DH};

pub const AVERAGE_SPEED_KMH: f64 = 30.0;

/// `distance_km` must be a non-negative haversine result.
pub fn price_dh(distance_km: f64, mode: TariffMode) -> f64 {
    debug_assert!(distance_km >= 0.0, "distance must be non-negative, got {distance_km}");
    round_2dp(BASE_FARE_DH + distance_km * mode.per_km_rate())
}

/// Trip duration at the city-average speed, rounded half away from zero.
pub fn eta_minutes(distance_km: f64) -> u32 {
    debug_assert!(distance_km >= 0.0, "distance must be non-negative, got {distance_km}");
    (distance_km * 60.0 / AVERAGE_SPEED_KMH).round() as u32
}

pub fn estimate_fare(departure: &Location, destination: &Location) -> FareEstimate {
    let distance_km = distance_km(&departure.coordinates, &destination.coordinates);

    FareEstimate {
        distance_km,
        day_price_dh: price_dh(distance_km, TariffMode::Day),
        night_price_dh: price_dh(distance_km, TariffMode::Night),
        eta_minutes: eta_minutes(distance_km),
    }
}
