//! # Cinema Seating Testing
//!
//! Testing utilities and helpers for the cinema seating crate.
//!
//! This crate provides:
//! - Mock implementations of environment traits
//! - Fixtures for the stock eight-row cinema
//! - Property-based testing strategies
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use cinema_seating_testing::fixtures::cinema_session;
//!
//! #[test]
//! fn test_commit_flow() {
//!     let (mut session, notifier) = cinema_session(&["A1", "C4"]);
//!
//!     session.toggle(&"A2".into());
//!     session.commit().unwrap();
//!
//!     assert_eq!(notifier.count(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use cinema_seating::{BookingNotifier, BookingResult, Clock};

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of environment traits
pub mod mocks {
    use super::{BookingNotifier, BookingResult, Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use cinema_seating_testing::mocks::FixedClock;
    /// use cinema_seating::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Notifier that records every delivered booking
    ///
    /// Clones share the same log, so keep one handle and give the other to
    /// the environment.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNotifier {
        results: Arc<Mutex<Vec<BookingResult>>>,
    }

    impl RecordingNotifier {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Bookings delivered so far, oldest first
        #[must_use]
        pub fn results(&self) -> Vec<BookingResult> {
            self.results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of bookings delivered so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }

    impl BookingNotifier for RecordingNotifier {
        fn on_booking_complete(&self, result: &BookingResult) {
            self.results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(result.clone());
        }
    }
}

/// Ready-made venues and sessions
pub mod fixtures {
    use super::mocks::{RecordingNotifier, test_clock};
    use cinema_seating::{
        BookingSession, SeatId, SeatMapBuilder, SeatingEnvironment, SeatingReducer, SeatingState,
        VenueConfig,
    };
    use std::sync::Arc;

    /// Stock cinema: rows A-H, 12 seats, aisle after seat 5, three tiers
    #[must_use]
    pub fn cinema_config() -> VenueConfig {
        VenueConfig::default()
    }

    /// Fixed clock and a fresh recorder
    #[must_use]
    pub fn test_environment() -> (SeatingEnvironment, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let env = SeatingEnvironment::new(Arc::new(test_clock()), Arc::new(notifier.clone()));
        (env, notifier)
    }

    /// Reducer and initial state for the stock cinema
    ///
    /// # Panics
    ///
    /// Panics if the stock cinema config is invalid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn cinema_reducer(booked: &[&str]) -> (SeatingReducer, SeatingState) {
        let config = cinema_config();
        let builder = SeatMapBuilder::new(config.layout, &config.tiers)
            .expect("stock cinema config is valid");
        let ids: Vec<SeatId> = booked.iter().map(|id| SeatId::from(*id)).collect();
        let state = SeatingState::new(builder.build(&ids));
        (SeatingReducer::new(builder), state)
    }

    /// Session over the stock cinema with a fixed clock
    ///
    /// # Panics
    ///
    /// Panics if the stock cinema config is invalid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn cinema_session(booked: &[&str]) -> (BookingSession, RecordingNotifier) {
        let (env, notifier) = test_environment();
        let ids: Vec<SeatId> = booked.iter().map(|id| SeatId::from(*id)).collect();
        let session =
            BookingSession::new(cinema_config(), &ids, env).expect("stock cinema config is valid");
        (session, notifier)
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use cinema_seating::{AislePositions, LayoutSpec, SeatId, TierConfig, TierDefinition};
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    /// Valid layouts up to 40 rows by 24 seats, with aisles inside the row
    pub fn layout_strategy() -> impl Strategy<Value = LayoutSpec> {
        (1usize..=40, 1usize..=24).prop_flat_map(|(rows, seats_per_row)| {
            let positions: Vec<usize> = (0..=seats_per_row).collect();
            subsequence(positions, 0..=(seats_per_row + 1).min(3)).prop_map(move |aisles| {
                LayoutSpec::new(rows, seats_per_row, AislePositions::from(aisles))
            })
        })
    }

    /// One to six tiers whose row sets cover some rows of a `rows`-row venue
    pub fn tier_config_strategy(rows: usize) -> impl Strategy<Value = TierConfig> {
        prop::collection::vec(
            (
                1u64..1_000,
                prop::collection::btree_set(0..rows.max(1), 0..=rows.clamp(1, 3)),
            ),
            1..=6,
        )
        .prop_map(|tiers| {
            TierConfig::new(
                tiers
                    .into_iter()
                    .enumerate()
                    .map(|(index, (price, rows))| {
                        TierDefinition::new(
                            format!("tier{index}"),
                            format!("Tier {index}"),
                            price,
                            rows,
                        )
                    })
                    .collect(),
            )
        })
    }

    /// Clicks drawn from `layout`'s seats plus a few ids that do not exist
    pub fn click_strategy(
        layout: &LayoutSpec,
        max_clicks: usize,
    ) -> impl Strategy<Value = Vec<SeatId>> + use<> {
        let rows = layout.rows;
        let seats_per_row = layout.seats_per_row;
        prop::collection::vec(
            prop_oneof![
                9 => (0..rows, 0..seats_per_row).prop_map(|(row, col)| SeatId::new(row, col)),
                1 => Just(SeatId::from("ZZZ999")),
            ],
            0..=max_clicks,
        )
    }
}

/// Initialise tracing for a test run
///
/// Output goes through the test writer so it is captured per test. Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_seating=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{cinema_config, cinema_session, test_environment};
pub use mocks::{FixedClock, RecordingNotifier, test_clock};
