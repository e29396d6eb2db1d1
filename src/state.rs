use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::clock::Clock;
use crate::engine::session::RideSession;
use crate::models::driver::{default_roster, Driver, DriverPicker, RandomDriverPicker};
use crate::models::location::LocationCatalog;
use crate::models::ride::RideProgressEvent;
use crate::models::taxi::{default_fleet, Taxi};
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub locations: LocationCatalog,
    pub drivers: Vec<Driver>,
    pub taxis: Vec<Taxi>,
    pub driver_picker: Box<dyn DriverPicker>,
    pub clock: Arc<dyn Clock>,
    pub session: Mutex<RideSession>,
    pub progress_events_tx: broadcast::Sender<RideProgressEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, clock: Arc<dyn Clock>) -> Self {
        let (progress_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            locations: LocationCatalog::casablanca(),
            drivers: default_roster(),
            taxis: default_fleet(),
            driver_picker: Box::new(RandomDriverPicker),
            clock,
            session: Mutex::new(RideSession::new()),
            progress_events_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn with_driver_picker(mut self, picker: impl DriverPicker + 'static) -> Self {
        self.driver_picker = Box::new(picker);
        self
    }

    pub fn publish(&self, event: RideProgressEvent) {
        // No subscribers is fine; the event is simply dropped.
        let _ = self.progress_events_tx.send(event);
    }
}
