//! A failing subscriber must not take the manager or its neighbours down.

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use floem_responsive_test::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter, layer::SubscriberExt};

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_panicking_subscriber_does_not_block_others() {
    let harness = TestHarness::new_with_size(375, 812);
    let tracker = NotificationTracker::new();

    let _before = tracker.track_named("before", harness.manager());
    let _bad = harness
        .manager()
        .on_layout_change(|tier| panic!("cannot render {tier}"));
    let _after = tracker.track_named("after", harness.manager());

    harness.resize(1100, 800);
    harness.resize(2000, 1000);

    let mut names = tracker.names();
    names.sort();
    assert_eq!(names, vec!["after", "after", "before", "before"]);
    assert_eq!(harness.tier(), Tier::UltraWide);
    assert_eq!(harness.manager().subscriber_count(), 3);
}

#[test]
fn test_manager_usable_after_panic() {
    let harness = TestHarness::new_with_size(375, 812);
    let armed = Rc::new(Cell::new(true));
    let _flaky = harness.manager().on_layout_change({
        let armed = armed.clone();
        move |_| {
            if armed.replace(false) {
                panic!("first render fails");
            }
        }
    });
    let tracker = NotificationTracker::new();
    let _sub = tracker.track(harness.manager());

    harness.resize(800, 600);
    harness.resize(375, 812);

    assert_eq!(tracker.tiers(), vec![Tier::Tablet, Tier::Mobile]);
    assert!(!armed.get());
}

#[test]
fn test_subscribing_during_notification() {
    let harness = TestHarness::new_with_size(375, 812);
    let tracker = NotificationTracker::new();
    let late = Rc::new(std::cell::RefCell::new(Vec::new()));

    let _spawner = harness.manager().on_layout_change({
        let manager = harness.manager().clone();
        let tracker = tracker.clone();
        let late = late.clone();
        move |_| late.borrow_mut().push(tracker.track(&manager))
    });

    harness.resize(800, 600);
    assert_eq!(tracker.count(), 0);
    assert_eq!(harness.manager().subscriber_count(), 2);

    harness.resize(1100, 800);
    assert_eq!(tracker.tiers(), vec![Tier::Desktop]);
}

#[test]
fn test_panics_and_fallbacks_are_logged() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("floem_responsive=debug"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(logs.clone()),
        );

    tracing::subscriber::with_default(subscriber, || {
        let harness = TestHarness::new_with_size(375, 812);
        let _bad = harness
            .manager()
            .on_layout_change(|_| panic!("logged, not propagated"));
        harness.resize(1100, 800);
        harness.disconnect();
        assert_eq!(harness.tier(), Tier::Desktop);
    });

    let output = logs.contents();
    assert!(output.contains("layout tier changed"), "{output}");
    assert!(output.contains("layout subscriber panicked"), "{output}");
    assert!(output.contains("viewport size unavailable"), "{output}");
    assert!(output.contains("WARN"), "{output}");
    assert!(!output.contains("TRACE"), "{output}");
}
