use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub fare_estimates_total: IntCounter,
    pub rides_booked_total: IntCounterVec,
    pub rides_ended_total: IntCounterVec,
    pub active_ride_progress_percent: Gauge,
    pub ride_fare_dh: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let fare_estimates_total =
            IntCounter::new("fare_estimates_total", "Total fare estimates computed")
                .expect("valid fare_estimates_total metric");

        let rides_booked_total = IntCounterVec::new(
            Opts::new("rides_booked_total", "Total rides booked by tariff mode"),
            &["tariff"],
        )
        .expect("valid rides_booked_total metric");

        let rides_ended_total = IntCounterVec::new(
            Opts::new("rides_ended_total", "Total rides ended by outcome"),
            &["outcome"],
        )
        .expect("valid rides_ended_total metric");

        let active_ride_progress_percent = Gauge::new(
            "active_ride_progress_percent",
            "Progress of the active ride [0..100]",
        )
        .expect("valid active_ride_progress_percent metric");

        let ride_fare_dh = Histogram::with_opts(
            HistogramOpts::new("ride_fare_dh", "Final fare of completed rides in DH")
                .buckets(vec![7.5, 10.0, 15.0, 20.0, 30.0, 50.0, 75.0, 100.0]),
        )
        .expect("valid ride_fare_dh metric");

        registry
            .register(Box::new(fare_estimates_total.clone()))
            .expect("register fare_estimates_total");
        registry
            .register(Box::new(rides_booked_total.clone()))
            .expect("register rides_booked_total");
        registry
            .register(Box::new(rides_ended_total.clone()))
            .expect("register rides_ended_total");
        registry
            .register(Box::new(active_ride_progress_percent.clone()))
            .expect("register active_ride_progress_percent");
        registry
            .register(Box::new(ride_fare_dh.clone()))
            .expect("register ride_fare_dh");

        Self {
            registry,
            fare_estimates_total,
            rides_booked_total,
            rides_ended_total,
            active_ride_progress_percent,
            ride_fare_dh,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
