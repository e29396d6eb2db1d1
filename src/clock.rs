use chrono::{DateTime, FixedOffset, Utc};

/// Wall-clock source, injected wherever the current local time matters.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock and shifts it into the configured local offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant.
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// A clock stuck at `hour:00` local time on 2024-06-01 in the given offset.
    pub fn at_local_hour(hour: u32, offset_hours: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_hours * 3600)?;
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)?.and_hms_opt(hour, 0, 0)?;
        let now = naive.and_local_timezone(offset).single()?;
        Some(Self::new(now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
