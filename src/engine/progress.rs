use crate::engine::fare::price_dh;
use crate::error::AppError;
use crate::geo::interpolate;
use crate::models::ride::{RideProgressView, RideRecord};

/// Planned ride duration. Playback speed is applied by whoever feeds the
/// elapsed time, never here.
pub fn total_seconds(record: &RideRecord) -> u64 {
    u64::from(record.eta_minutes) * 60
}

/// Projects a booked ride onto `elapsed_seconds` since it started.
///
/// Pure: the same record and elapsed time always give the same view.
/// Progress is clamped at 100%, and a ride with no planned duration is
/// complete from the first second.
pub fn advance_ride(
    record: &RideRecord,
    elapsed_seconds: f64,
) -> Result<RideProgressView, AppError> {
    if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "elapsed_seconds must be a non-negative number, got {elapsed_seconds}"
        )));
    }

    let total = total_seconds(record) as f64;
    let progress_percent = if total == 0.0 {
        100.0
    } else {
        (elapsed_seconds / total * 100.0).min(100.0)
    };

    let fraction = progress_percent / 100.0;
    let distance_covered_km = fraction * record.distance_km;

    Ok(RideProgressView {
        elapsed_seconds,
        progress_percent,
        distance_covered_km,
        current_position: interpolate(
            &record.departure.coordinates,
            &record.destination.coordinates,
            fraction,
        ),
        current_price_dh: price_dh(distance_covered_km, record.tariff_mode),
        remaining_seconds: (total - elapsed_seconds).max(0.0),
        is_complete: progress_percent >= 100.0,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{advance_ride, total_seconds};
    use crate::engine::fare::estimate_fare;
    use crate::error::AppError;
    use crate::models::location::LocationCatalog;
    use crate::models::ride::RideRecord;
    use crate::tariff::TariffMode;

    fn ride(from: &str, to: &str, mode: TariffMode) -> RideRecord {
        let catalog = LocationCatalog::casablanca();
        let departure = catalog.require(from).unwrap().clone();
        let destination = catalog.require(to).unwrap().clone();
        let estimate = estimate_fare(&departure, &destination);

        RideRecord {
            id: Uuid::new_v4(),
            departure,
            destination,
            distance_km: estimate.distance_km,
            price_dh: estimate.price_for(mode),
            eta_minutes: estimate.eta_minutes,
            tariff_mode: mode,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn starts_at_departure_with_base_fare() {
        let record = ride("morocco-mall", "twin-center", TariffMode::Day);
        let view = advance_ride(&record, 0.0).unwrap();

        assert_eq!(view.progress_percent, 0.0);
        assert_eq!(view.distance_covered_km, 0.0);
        assert_eq!(view.current_price_dh, 7.50);
        assert_eq!(view.current_position, record.departure.coordinates);
        assert_eq!(view.remaining_seconds, 360.0);
        assert!(!view.is_complete);
    }

    #[test]
    fn halfway_through_morocco_mall_to_twin_center() {
        let record = ride("morocco-mall", "twin-center", TariffMode::Day);
        assert_eq!(total_seconds(&record), 360);

        let view = advance_ride(&record, 180.0).unwrap();
        assert_eq!(view.progress_percent, 50.0);
        assert!((view.distance_covered_km - 1.57).abs() < 1e-9);
        assert_eq!(view.current_price_dh, 9.86);
        assert_eq!(view.remaining_seconds, 180.0);
        assert!(!view.is_complete);
    }

    #[test]
    fn accrues_at_the_tariff_locked_at_booking() {
        let night = ride("morocco-mall", "twin-center", TariffMode::Night);
        let view = advance_ride(&night, 180.0).unwrap();
        assert_eq!(view.current_price_dh, 10.64);
    }

    #[test]
    fn clamps_at_completion_however_late() {
        let record = ride("twin-center", "aeroport-mohammed-v", TariffMode::Day);
        let total = total_seconds(&record) as f64;

        let at_end = advance_ride(&record, total).unwrap();
        for overshoot in [1.0, 60.0, 86_400.0] {
            let view = advance_ride(&record, total + overshoot).unwrap();
            assert_eq!(view.progress_percent, 100.0);
            assert!(view.is_complete);
            assert_eq!(view.current_price_dh, at_end.current_price_dh);
            assert_eq!(view.remaining_seconds, 0.0);
        }
        assert_eq!(at_end.current_price_dh, record.price_dh);
    }

    #[test]
    fn progress_and_price_never_decrease() {
        let record = ride("ain-diab", "gare-casa", TariffMode::Night);
        let total = total_seconds(&record);

        let mut previous = advance_ride(&record, 0.0).unwrap();
        for t in 1..=total {
            let view = advance_ride(&record, t as f64).unwrap();
            assert!(view.progress_percent >= previous.progress_percent);
            assert!(view.distance_covered_km >= previous.distance_covered_km);
            assert!(view.current_price_dh >= previous.current_price_dh);
            previous = view;
        }
        assert!(previous.is_complete);
    }

    #[test]
    fn zero_length_ride_is_complete_immediately() {
        let record = ride("marina", "marina", TariffMode::Day);
        assert_eq!(total_seconds(&record), 0);

        let view = advance_ride(&record, 0.0).unwrap();
        assert_eq!(view.progress_percent, 100.0);
        assert!(view.is_complete);
        assert_eq!(view.current_price_dh, 7.50);
    }

    #[test]
    fn rejects_negative_or_nan_elapsed() {
        let record = ride("morocco-mall", "twin-center", TariffMode::Day);
        assert!(matches!(
            advance_ride(&record, -1.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(advance_ride(&record, f64::NAN).is_err());
        assert!(advance_ride(&record, f64::INFINITY).is_err());
    }
}
