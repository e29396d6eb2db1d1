use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::location::{Coordinate, Location};
use crate::tariff::TariffMode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FareEstimate {
    pub distance_km: f64,
    pub day_price_dh: f64,
    pub night_price_dh: f64,
    pub eta_minutes: u32,
}

impl FareEstimate {
    pub fn price_for(&self, mode: TariffMode) -> f64 {
        match mode {
            TariffMode::Day => self.day_price_dh,
            TariffMode::Night => self.night_price_dh,
        }
    }
}

/// A booked ride. Fixed at booking time; the tariff never changes mid-ride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RideRecord {
    pub id: Uuid,
    pub departure: Location,
    pub destination: Location,
    pub distance_km: f64,
    pub price_dh: f64,
    pub eta_minutes: u32,
    pub tariff_mode: TariffMode,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RidePhase {
    Booked,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RideProgressView {
    pub elapsed_seconds: f64,
    pub progress_percent: f64,
    pub distance_covered_km: f64,
    pub current_position: Coordinate,
    pub current_price_dh: f64,
    pub remaining_seconds: f64,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRide {
    pub record: RideRecord,
    pub driver: Option<Driver>,
    pub phase: RidePhase,
    pub view: RideProgressView,
}

/// History entry written when a ride is ended normally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRide {
    pub ride: RideRecord,
    pub driver: Option<Driver>,
    pub final_price_dh: f64,
    pub distance_covered_km: f64,
    pub progress_percent: f64,
    pub duration_seconds: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideProgressEvent {
    pub ride_id: Uuid,
    pub phase: RidePhase,
    pub view: RideProgressView,
    /// Elapsed ride time as shown on the live screen, `m:ss`.
    pub timer: String,
    pub remaining_km: f64,
}
