use crate::models::ride::{ActiveRide, CompletedRide, RideProgressEvent};

/// Live ride timer, `m:ss`.
pub fn format_timer(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Summary duration, `Xm Ys`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Distance still to drive, to the nearest 100 m.
pub fn remaining_distance_km(total_km: f64, progress_percent: f64) -> f64 {
    let fraction = (progress_percent / 100.0).clamp(0.0, 1.0);
    ((1.0 - fraction) * total_km * 10.0).round() / 10.0
}

/// Snapshot of the active ride for live subscribers.
pub fn progress_event(active: &ActiveRide) -> RideProgressEvent {
    RideProgressEvent {
        ride_id: active.record.id,
        phase: active.phase,
        view: active.view,
        timer: format_timer(active.view.elapsed_seconds.floor() as u64),
        remaining_km: remaining_distance_km(
            active.record.distance_km,
            active.view.progress_percent,
        ),
    }
}

pub fn receipt_text(entry: &CompletedRide) -> String {
    format!(
        "MOVE Receipt\n\n\
         Pickup: {}\n\
         Destination: {}\n\
         Distance: {}km\n\
         Time: {}\n\
         Total: {}DH\n\n\
         Thank you for using CASATAXI!",
        entry.ride.departure.name,
        entry.ride.destination.name,
        entry.ride.distance_km,
        format_duration(entry.duration_seconds),
        entry.final_price_dh,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{
        format_duration, format_timer, progress_event, receipt_text, remaining_distance_km,
    };
    use crate::engine::booking::book_ride;
    use crate::engine::progress::advance_ride;
    use crate::models::location::LocationCatalog;
    use crate::models::ride::{ActiveRide, CompletedRide, RidePhase, RideRecord};
    use crate::tariff::TariffMode;

    #[test]
    fn timer_pads_seconds() {
        assert_eq!(format_timer(0), "0:00");
        assert_eq!(format_timer(65), "1:05");
        assert_eq!(format_timer(600), "10:00");
    }

    #[test]
    fn duration_uses_minutes_and_seconds() {
        assert_eq!(format_duration(360), "6m 0s");
        assert_eq!(format_duration(59), "0m 59s");
    }

    #[test]
    fn remaining_distance_rounds_to_tenths() {
        assert_eq!(remaining_distance_km(3.14, 0.0), 3.1);
        assert_eq!(remaining_distance_km(3.14, 50.0), 1.6);
        assert_eq!(remaining_distance_km(3.14, 100.0), 0.0);
        assert_eq!(remaining_distance_km(3.14, 150.0), 0.0);
    }

    #[test]
    fn receipt_lists_route_and_total() {
        let catalog = LocationCatalog::casablanca();
        let entry = CompletedRide {
            ride: RideRecord {
                id: Uuid::new_v4(),
                departure: catalog.require("morocco-mall").unwrap().clone(),
                destination: catalog.require("twin-center").unwrap().clone(),
                distance_km: 3.14,
                price_dh: 12.21,
                eta_minutes: 6,
                tariff_mode: TariffMode::Day,
                created_at: Utc::now(),
            },
            driver: None,
            final_price_dh: 12.21,
            distance_covered_km: 3.14,
            progress_percent: 100.0,
            duration_seconds: 360,
            completed_at: Utc::now(),
        };

        let receipt = receipt_text(&entry);
        assert!(receipt.starts_with("MOVE Receipt\n\n"));
        assert!(receipt.contains("Pickup: Morocco Mall\n"));
        assert!(receipt.contains("Destination: Twin Center\n"));
        assert!(receipt.contains("Distance: 3.14km\n"));
        assert!(receipt.contains("Time: 6m 0s\n"));
        assert!(receipt.contains("Total: 12.21DH"));
    }

    #[test]
    fn progress_event_carries_live_timer_and_remaining_distance() {
        let catalog = LocationCatalog::casablanca();
        let record = book_ride(
            catalog.require("morocco-mall").unwrap(),
            catalog.require("twin-center").unwrap(),
            12.21,
            TariffMode::Day,
            Utc::now(),
        )
        .unwrap();
        let view = advance_ride(&record, 185.0).unwrap();
        let active = ActiveRide {
            record,
            driver: None,
            phase: RidePhase::InProgress,
            view,
        };

        let event = progress_event(&active);
        assert_eq!(event.ride_id, active.record.id);
        assert_eq!(event.phase, RidePhase::InProgress);
        assert_eq!(event.timer, "3:05");
        assert_eq!(event.remaining_km, 1.5);
    }
}
