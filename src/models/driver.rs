use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: u32,
    pub name: String,
    pub rating: f64,
    pub reviews: u32,
    pub phone: String,
    pub car: String,
    pub plate: String,
}

/// Chooses who drives a freshly booked ride. Purely cosmetic; the fare and
/// progress math never look at the driver.
pub trait DriverPicker: Send + Sync {
    fn pick(&self, roster: &[Driver]) -> Option<Driver>;
}

pub struct RandomDriverPicker;

impl DriverPicker for RandomDriverPicker {
    fn pick(&self, roster: &[Driver]) -> Option<Driver> {
        roster.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Always picks the driver at `index` (wrapping), for reproducible runs.
pub struct FixedDriverPicker {
    pub index: usize,
}

impl DriverPicker for FixedDriverPicker {
    fn pick(&self, roster: &[Driver]) -> Option<Driver> {
        if roster.is_empty() {
            return None;
        }
        roster.get(self.index % roster.len()).cloned()
    }
}

const ROSTER: [(&str, f64, u32, &str, &str); 6] = [
    ("Ahmed Ben Ali", 4.8, 245, "Red Peugeot 407", "AB 12345"),
    ("Mohamed Hassan", 4.9, 312, "Red Fiat Punto", "CD 67890"),
    ("Karim Younis", 4.7, 189, "Red Renault Dacia", "EF 34567"),
    ("Hassan Mansouri", 4.9, 401, "Red Dacia Logan", "GH 78901"),
    ("Rachid Salam", 4.6, 267, "Red Hyundai i10", "IJ 56789"),
    ("Tariq Belkhir", 4.8, 328, "Red Citroën C1", "KL 23456"),
];

pub fn default_roster() -> Vec<Driver> {
    ROSTER
        .iter()
        .zip(1..)
        .map(|((name, rating, reviews, car, plate), id)| Driver {
            id,
            name: name.to_string(),
            rating: *rating,
            reviews: *reviews,
            phone: "+212 600 000 000".to_string(),
            car: car.to_string(),
            plate: plate.to_string(),
        })
        .collect()
}
