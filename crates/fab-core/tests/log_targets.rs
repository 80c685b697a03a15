//! Each component logs under its own target.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fab_core::event::PointerSource;
use fab_core::geometry::{Point, Size};
use fab_core::gesture::{GestureClassifier, GestureConfig};
use fab_core::greeting::GreetingPlayer;
use fab_core::logging::{TARGET_GESTURE, TARGET_GREETING, TARGET_TIMER};
use fab_core::position::PositionTracker;
use fab_core::timer::TimerSlot;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
}

struct Capture(Arc<Mutex<Vec<CapturedEvent>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture(events.clone()));
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

#[test]
fn press_and_release_log_under_gesture_target() {
    let events = with_captured_tracing(|| {
        let mut gc = GestureClassifier::new(GestureConfig::default());
        let viewport = Size::new(800.0, 600.0);
        let tracker = PositionTracker::new(Point::new(100.0, 100.0), viewport, 16.0, 88.0);
        let origin = tracker.position();
        gc.press(PointerSource::Mouse, Point::new(110.0, 110.0), origin, Duration::ZERO);
        gc.release(PointerSource::Mouse, Duration::from_millis(10));
    });

    let gesture: Vec<_> = events.iter().filter(|e| e.target == TARGET_GESTURE).collect();
    assert_eq!(gesture.len(), 2);
    assert!(gesture.iter().all(|e| e.level == tracing::Level::DEBUG));
}

#[test]
fn rescheduling_an_armed_slot_logs_under_timer_target() {
    let events = with_captured_tracing(|| {
        let mut slot = TimerSlot::new("test");
        slot.schedule(Duration::ZERO, Duration::from_millis(200));
        slot.schedule(Duration::from_millis(5), Duration::from_millis(200));
    });

    let timer: Vec<_> = events.iter().filter(|e| e.target == TARGET_TIMER).collect();
    assert_eq!(timer.len(), 1);
    assert_eq!(timer[0].level, tracing::Level::TRACE);
}

#[test]
fn reveal_logs_under_greeting_target() {
    let events = with_captured_tracing(|| {
        let mut player = GreetingPlayer::new();
        player.start_reveal("hi", Duration::from_millis(35), Duration::ZERO);
        player.tick(Duration::from_millis(70));
    });

    let greeting = events.iter().filter(|e| e.target == TARGET_GREETING).count();
    assert_eq!(greeting, 2);
}
