use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::fare::estimate_fare;
use crate::error::AppError;
use crate::models::location::Location;
use crate::models::ride::RideRecord;
use crate::tariff::TariffMode;

/// Builds the immutable record for a confirmed booking. Distance and ETA are
/// recomputed from the two locations; the price is whatever the rider agreed to.
pub fn book_ride(
    departure: &Location,
    destination: &Location,
    chosen_price_dh: f64,
    tariff_mode: TariffMode,
    created_at: DateTime<Utc>,
) -> Result<RideRecord, AppError> {
    departure.coordinates.validate()?;
    destination.coordinates.validate()?;

    if !chosen_price_dh.is_finite() || chosen_price_dh < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "price must be a non-negative number, got {chosen_price_dh}"
        )));
    }

    let estimate = estimate_fare(departure, destination);

    Ok(RideRecord {
        id: Uuid::new_v4(),
        departure: departure.clone(),
        destination: destination.clone(),
        distance_km: estimate.distance_km,
        price_dh: chosen_price_dh,
        eta_minutes: estimate.eta_minutes,
        tariff_mode,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::book_ride;
    use crate::error::AppError;
    use crate::models::location::{Coordinate, Location, LocationCatalog};
    use crate::tariff::TariffMode;

    #[test]
    fn records_estimate_and_chosen_tariff() {
        let catalog = LocationCatalog::casablanca();
        let mall = catalog.require("morocco-mall").unwrap();
        let twin_center = catalog.require("twin-center").unwrap();

        let record = book_ride(mall, twin_center, 13.78, TariffMode::Night, Utc::now()).unwrap();
        assert_eq!(record.distance_km, 3.14);
        assert_eq!(record.eta_minutes, 6);
        assert_eq!(record.price_dh, 13.78);
        assert_eq!(record.tariff_mode, TariffMode::Night);
        assert_eq!(record.departure.id, "morocco-mall");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let catalog = LocationCatalog::casablanca();
        let bogus = Location {
            id: "bogus".to_string(),
            name: "Bogus".to_string(),
            coordinates: Coordinate {
                latitude: 123.0,
                longitude: -7.0,
            },
        };

        let result = book_ride(
            &bogus,
            catalog.require("marina").unwrap(),
            10.0,
            TariffMode::Day,
            Utc::now(),
        );
        assert!(matches!(result, Err(AppError::InvalidCoordinate { .. })));
    }

    #[test]
    fn rejects_negative_price() {
        let catalog = LocationCatalog::casablanca();
        let marina = catalog.require("marina").unwrap();
        let result = book_ride(marina, marina, -1.0, TariffMode::Day, Utc::now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
