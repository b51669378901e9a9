//! Property-based tests for threshold filtering

use proptest::prelude::*;
use shmbus_logging::{CallbackAdapter, LogLevel, LogRouter};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn arb_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

proptest! {
    /// Property: a record is emitted exactly when its level is at or above the threshold
    #[test]
    fn proptest_threshold_filters_by_order(threshold in arb_level(), level in arb_level()) {
        let router = LogRouter::new();
        let emitted = Arc::new(AtomicUsize::new(0));
        let counter = emitted.clone();
        router
            .install_callback(CallbackAdapter::from_fn(move |_, _, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        router.set_level(threshold);

        router.write(level, Some("prop"), "m");

        let expected = usize::from(level >= threshold);
        prop_assert_eq!(emitted.load(Ordering::SeqCst), expected);
    }

    /// Property: the threshold reads back exactly as set
    #[test]
    fn proptest_set_level_roundtrips(level in arb_level()) {
        let router = LogRouter::new();

        router.set_level(level);

        prop_assert_eq!(router.level(), level);
    }
}
