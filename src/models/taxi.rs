use serde::{Deserialize, Serialize};

use crate::geo::distance_km;
use crate::models::location::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxi {
    pub id: String,
    pub driver_name: String,
    pub position: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyTaxi {
    pub taxi: Taxi,
    pub distance_km: f64,
}

const FLEET: [(&str, &str, f64, f64); 6] = [
    ("TAXI-001", "Hassan", 33.5821, -7.5998),
    ("TAXI-002", "Mohammed", 33.5741, -7.5788),
    ("TAXI-003", "Adil", 33.5621, -7.5998),
    ("TAXI-004", "Fatima", 33.5841, -7.5798),
    ("TAXI-005", "Karim", 33.5731, -7.6098),
    ("TAXI-006", "Leila", 33.5651, -7.5998),
];

/// Taxis idling around the Casablanca city centre.
pub fn default_fleet() -> Vec<Taxi> {
    FLEET
        .iter()
        .map(|(id, driver_name, latitude, longitude)| Taxi {
            id: id.to_string(),
            driver_name: driver_name.to_string(),
            position: Coordinate {
                latitude: *latitude,
                longitude: *longitude,
            },
        })
        .collect()
}

/// Fleet ordered nearest first; ties keep fleet order.
pub fn nearby_taxis(position: &Coordinate, fleet: &[Taxi]) -> Vec<NearbyTaxi> {
    let mut nearby: Vec<NearbyTaxi> = fleet
        .iter()
        .map(|taxi| NearbyTaxi {
            taxi: taxi.clone(),
            distance_km: distance_km(position, &taxi.position),
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}
