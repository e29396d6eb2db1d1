use std::env;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub tick_interval_ms: u64,
    /// Simulated ride seconds per wall-clock second. 1.0 plays rides back at
    /// their advertised ETA; 2.0 finishes them in half the time.
    pub playback_speed: f64,
    pub utc_offset_hours: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let config = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 256)?,
            tick_interval_ms: parse_or_default("TICK_INTERVAL_MS", 1000)?,
            playback_speed: parse_or_default("PLAYBACK_SPEED", 1.0)?,
            utc_offset_hours: parse_or_default("UTC_OFFSET_HOURS", 1)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !self.playback_speed.is_finite() || self.playback_speed <= 0.0 {
            return Err(AppError::Internal(format!(
                "invalid PLAYBACK_SPEED: {} (must be > 0)",
                self.playback_speed
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(AppError::Internal(
                "invalid TICK_INTERVAL_MS: must be > 0".to_string(),
            ));
        }

        if self.event_buffer_size == 0 {
            return Err(AppError::Internal(
                "invalid EVENT_BUFFER_SIZE: must be > 0".to_string(),
            ));
        }

        self.utc_offset().map(|_| ())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, AppError> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(AppError::Internal(format!(
                "invalid UTC_OFFSET_HOURS: {}",
                self.utc_offset_hours
            )));
        }

        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            AppError::Internal(format!(
                "invalid UTC_OFFSET_HOURS: {}",
                self.utc_offset_hours
            ))
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
