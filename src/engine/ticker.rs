use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::engine::receipt::progress_event;
use crate::models::ride::{RidePhase, RideProgressEvent};
use crate::state::AppState;

/// Drives the active ride's clock. Each wall-clock tick of `period` adds
/// `period * playback_speed` seconds of ride time.
pub async fn run_ride_ticker(state: Arc<AppState>, period: Duration, playback_speed: f64) {
    info!(
        period_ms = period.as_millis() as u64,
        playback_speed, "ride ticker started"
    );

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let delta_seconds = period.as_secs_f64() * playback_speed;

    loop {
        ticker.tick().await;
        tick_once(&state, delta_seconds).await;
    }
}

/// Advances the active ride by `delta_seconds` and publishes the new view.
/// Returns `None` when there is nothing to advance: no active ride, or one
/// that already completed and is waiting to be ended.
///
/// The session lock is held until the event is published, so a ride ended
/// concurrently never receives a late progress update.
pub async fn tick_once(state: &AppState, delta_seconds: f64) -> Option<RideProgressEvent> {
    let mut session = state.session.lock().await;

    let active = session.active()?;
    if active.phase == RidePhase::Completed {
        return None;
    }
    let ride_id = active.record.id;

    if let Err(err) = session.tick(delta_seconds) {
        warn!(ride_id = %ride_id, error = %err, "failed to advance ride");
        return None;
    }

    let event = progress_event(session.active()?);

    state
        .metrics
        .active_ride_progress_percent
        .set(event.view.progress_percent);

    if event.phase == RidePhase::Completed {
        info!(
            ride_id = %ride_id,
            price_dh = event.view.current_price_dh,
            "ride reached destination"
        );
    } else {
        debug!(
            ride_id = %ride_id,
            progress_percent = event.view.progress_percent,
            timer = %event.timer,
            "ride advanced"
        );
    }

    state.publish(event.clone());
    drop(session);

    Some(event)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::tick_once;
    use crate::clock::FixedClock;
    use crate::engine::booking::book_ride;
    use crate::models::ride::RidePhase;
    use crate::state::AppState;
    use crate::tariff::TariffMode;

    fn state() -> AppState {
        let clock = FixedClock::at_local_hour(10, 1).unwrap();
        AppState::new(16, Arc::new(clock))
    }

    async fn book(state: &AppState, from: &str, to: &str) {
        let record = book_ride(
            state.locations.require(from).unwrap(),
            state.locations.require(to).unwrap(),
            12.21,
            TariffMode::Day,
            Utc::now(),
        )
        .unwrap();
        state.session.lock().await.start(record, None).unwrap();
    }

    #[tokio::test]
    async fn idle_ticker_does_nothing() {
        let state = state();
        assert!(tick_once(&state, 1.0).await.is_none());
    }

    #[tokio::test]
    async fn playback_speed_scales_ride_time() {
        let state = state();
        book(&state, "morocco-mall", "twin-center").await;
        let mut rx = state.progress_events_tx.subscribe();

        let event = tick_once(&state, 2.0).await.unwrap();
        assert_eq!(event.view.elapsed_seconds, 2.0);
        assert_eq!(event.phase, RidePhase::InProgress);
        assert_eq!(rx.recv().await.unwrap().view.elapsed_seconds, 2.0);
    }

    #[tokio::test]
    async fn completed_ride_stops_ticking() {
        let state = state();
        book(&state, "morocco-mall", "twin-center").await;

        let last = tick_once(&state, 400.0).await.unwrap();
        assert_eq!(last.phase, RidePhase::Completed);
        assert_eq!(last.view.progress_percent, 100.0);

        assert!(tick_once(&state, 1.0).await.is_none());
    }

    #[tokio::test]
    async fn ticks_after_cancel_are_not_attributed() {
        let state = state();
        book(&state, "morocco-mall", "twin-center").await;
        let mut rx = state.progress_events_tx.subscribe();
        tick_once(&state, 1.0).await.unwrap();

        state.session.lock().await.cancel_ride().unwrap();
        state.metrics.active_ride_progress_percent.set(0.0);

        assert!(tick_once(&state, 1.0).await.is_none());
        assert_eq!(state.metrics.active_ride_progress_percent.get(), 0.0);

        assert_eq!(rx.recv().await.unwrap().view.elapsed_seconds, 1.0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn event_is_published_before_the_session_is_released() {
        let state = Arc::new(state());
        book(&state, "morocco-mall", "twin-center").await;
        let mut rx = state.progress_events_tx.subscribe();

        let ticker = tokio::spawn({
            let state = state.clone();
            async move { tick_once(&state, 30.0).await }
        });

        // Once the session is free again, the tick's event must already be out.
        let ended = loop {
            let mut session = state.session.lock().await;
            if session.active().map(|a| a.view.elapsed_seconds) == Some(30.0) {
                let ride_id = session.cancel_ride().unwrap().id;
                assert!(rx.try_recv().is_ok());
                break ride_id;
            }
            drop(session);
            tokio::task::yield_now().await;
        };

        let event = ticker.await.unwrap().unwrap();
        assert_eq!(event.ride_id, ended);
        assert_eq!(event.timer, "0:30");
        assert!(rx.try_recv().is_err());
    }
}
