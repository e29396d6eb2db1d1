use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Range check applied wherever coordinates enter the system. The
    /// distance and pricing math assumes it has already passed.
    pub fn validate(&self) -> Result<(), AppError> {
        let latitude_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let longitude_ok =
            self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);

        if latitude_ok && longitude_ok {
            Ok(())
        } else {
            Err(AppError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
}

/// Read-only set of named pickup/drop-off points, loaded once at startup.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

const CASABLANCA: [(&str, &str, f64, f64); 10] = [
    ("aeroport-mohammed-v", "Aéroport Mohammed V", 33.3673, -7.5898),
    ("gare-casa", "Gare Casa-Voyageurs", 33.5731, -7.5798),
    ("morocco-mall", "Morocco Mall", 33.5722, -7.6237),
    ("mosquee-hassan-ii", "Mosquée Hassan II", 33.6331, -7.6237),
    ("twin-center", "Twin Center", 33.5731, -7.5898),
    ("marina", "Marina de Casablanca", 33.5731, -7.6130),
    ("quartier-habous", "Quartier Habous", 33.5631, -7.6031),
    ("ain-diab", "Ain Diab", 33.5731, -7.6798),
    ("boulevard-zerktouni", "Boulevard Zerktouni", 33.5731, -7.5731),
    ("marche-central", "Marché Central", 33.5631, -7.5898),
];

impl LocationCatalog {
    pub fn new(locations: Vec<Location>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for location in &locations {
            location.coordinates.validate()?;
            if location.id.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "location id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(location.id.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "duplicate location id {}",
                    location.id
                )));
            }
        }

        Ok(Self { locations })
    }

    /// The ten popular Casablanca destinations offered by the booking screen.
    pub fn casablanca() -> Self {
        let locations = CASABLANCA
            .iter()
            .map(|(id, name, latitude, longitude)| Location {
                id: id.to_string(),
                name: name.to_string(),
                coordinates: Coordinate {
                    latitude: *latitude,
                    longitude: *longitude,
                },
            })
            .collect();

        Self { locations }
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Location, AppError> {
        self.get(id)
            .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))
    }
}
