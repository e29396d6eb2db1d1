use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::progress::{advance_ride, total_seconds};
use crate::error::AppError;
use crate::models::driver::Driver;
use crate::models::ride::{ActiveRide, CompletedRide, RidePhase, RideProgressView, RideRecord};

/// One rider's ride state: at most one active ride plus the append-only
/// history of rides that were ended normally.
///
/// Booked -> InProgress -> Completed. Completed is terminal until the ride
/// is ended with [`RideSession::complete_ride`]. [`RideSession::cancel_ride`]
/// drops a Booked or InProgress ride without touching history.
#[derive(Debug, Default)]
pub struct RideSession {
    active: Option<ActiveRide>,
    history: Vec<CompletedRide>,
}

impl RideSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveRide> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &[CompletedRide] {
        &self.history
    }

    pub fn find_completed(&self, ride_id: Uuid) -> Option<&CompletedRide> {
        self.history.iter().find(|entry| entry.ride.id == ride_id)
    }

    pub fn start(
        &mut self,
        record: RideRecord,
        driver: Option<Driver>,
    ) -> Result<&ActiveRide, AppError> {
        if let Some(current) = &self.active {
            return Err(AppError::InvalidRideState(format!(
                "ride {} is still active",
                current.record.id
            )));
        }

        let view = advance_ride(&record, 0.0)?;
        // A ride with no planned duration has already arrived.
        let phase = if view.is_complete {
            RidePhase::Completed
        } else {
            RidePhase::Booked
        };

        Ok(&*self.active.insert(ActiveRide {
            record,
            driver,
            phase,
            view,
        }))
    }

    /// Moves the active ride to `elapsed_seconds` since it started. Elapsed
    /// time may only grow. Once the ride is Completed the view is frozen.
    pub fn advance_to(&mut self, elapsed_seconds: f64) -> Result<RideProgressView, AppError> {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "elapsed_seconds must be a non-negative number, got {elapsed_seconds}"
            )));
        }

        let active = self.active_mut()?;

        if active.phase == RidePhase::Completed {
            return Ok(active.view);
        }

        if elapsed_seconds < active.view.elapsed_seconds {
            return Err(AppError::InvalidRideState(format!(
                "elapsed time cannot go backwards ({} < {})",
                elapsed_seconds, active.view.elapsed_seconds
            )));
        }

        let view = advance_ride(&active.record, elapsed_seconds)?;
        active.phase = if view.is_complete {
            RidePhase::Completed
        } else {
            RidePhase::InProgress
        };
        active.view = view;

        Ok(view)
    }

    pub fn tick(&mut self, delta_seconds: f64) -> Result<RideProgressView, AppError> {
        if delta_seconds < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "tick cannot be negative, got {delta_seconds}"
            )));
        }

        let elapsed = self.active_mut()?.view.elapsed_seconds + delta_seconds;
        self.advance_to(elapsed)
    }

    /// Ends the active ride normally and archives it with the fare accrued
    /// so far. A ride that never started cannot be completed.
    pub fn complete_ride(&mut self, completed_at: DateTime<Utc>) -> Result<CompletedRide, AppError> {
        let active = self.active_mut()?;
        if active.phase == RidePhase::Booked {
            return Err(AppError::InvalidRideState(format!(
                "ride {} has not started",
                active.record.id
            )));
        }

        let Some(active) = self.active.take() else {
            return Err(no_active_ride());
        };

        // Overshoot past arrival is not billed as ride time.
        let ride_seconds = active
            .view
            .elapsed_seconds
            .min(total_seconds(&active.record) as f64);

        let entry = CompletedRide {
            final_price_dh: active.view.current_price_dh,
            distance_covered_km: active.view.distance_covered_km,
            progress_percent: active.view.progress_percent,
            duration_seconds: ride_seconds.floor() as u64,
            ride: active.record,
            driver: active.driver,
            completed_at,
        };

        self.history.push(entry.clone());
        Ok(entry)
    }

    /// Discards a Booked or InProgress ride. History is untouched.
    pub fn cancel_ride(&mut self) -> Result<RideRecord, AppError> {
        let active = self.active_mut()?;
        if active.phase == RidePhase::Completed {
            return Err(AppError::InvalidRideState(format!(
                "ride {} already completed; end it instead",
                active.record.id
            )));
        }

        self.active
            .take()
            .map(|active| active.record)
            .ok_or_else(no_active_ride)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveRide, AppError> {
        self.active.as_mut().ok_or_else(no_active_ride)
    }
}

fn no_active_ride() -> AppError {
    AppError::InvalidRideState("no active ride".to_string())
}
