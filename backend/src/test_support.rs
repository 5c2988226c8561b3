//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and behaviour tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

pub mod clock {
    //! Deterministic clocks.

    use std::sync::{Mutex, MutexGuard};
    use std::time::Duration;

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Clock whose reading only changes when a test advances it.
    #[derive(Debug)]
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        /// Start the clock at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Start the clock at a fixed, arbitrary instant.
        pub fn at_fixture_epoch() -> Self {
            Self::new(fixture_epoch())
        }

        /// Move the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            let delta = match TimeDelta::from_std(delta) {
                Ok(delta) => delta,
                Err(error) => {
                    panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
                }
            };
            *self.lock_clock() += delta;
        }

        /// Move the clock by `seconds`, which may be negative.
        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }

    /// 2026-03-14T09:30:00Z.
    pub fn fixture_epoch() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).single() {
            Some(instant) => instant,
            None => panic!("fixture epoch must be a valid UTC instant"),
        }
    }
}
