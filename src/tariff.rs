//! Day/night tariff policy shared by fare estimation and live price accrual.

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Flat pickup charge in dirhams.
pub const BASE_FARE_DH: f64 = 7.50;

pub const DAY_RATE_DH_PER_KM: f64 = 1.50;
pub const NIGHT_RATE_DH_PER_KM: f64 = 2.00;

/// Day tariff covers local hours `[DAY_START_HOUR, DAY_END_HOUR)`.
pub const DAY_START_HOUR: u32 = 6;
pub const DAY_END_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TariffMode {
    Day,
    Night,
}

impl TariffMode {
    pub fn per_km_rate(self) -> f64 {
        match self {
            TariffMode::Day => DAY_RATE_DH_PER_KM,
            TariffMode::Night => NIGHT_RATE_DH_PER_KM,
        }
    }

    pub fn for_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
            TariffMode::Day
        } else {
            TariffMode::Night
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TariffMode::Day => "day",
            TariffMode::Night => "night",
        }
    }
}

pub fn tariff_mode_at<Tz: TimeZone>(now: &DateTime<Tz>) -> TariffMode {
    TariffMode::for_hour(now.hour())
}

pub fn current_tariff_mode(clock: &dyn Clock) -> TariffMode {
    tariff_mode_at(&clock.now())
}
