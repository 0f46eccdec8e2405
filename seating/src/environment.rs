//! Injected collaborators: clock and booking-completion callback.

use crate::types::BookingResult;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Receives every committed booking
///
/// This is where a caller forwards results to its reservation service.
/// Called exactly once per successful commit, after state has changed.
pub trait BookingNotifier: Send + Sync {
    /// Handle a committed booking
    fn on_booking_complete(&self, result: &BookingResult);
}

impl<F> BookingNotifier for F
where
    F: Fn(&BookingResult) + Send + Sync,
{
    fn on_booking_complete(&self, result: &BookingResult) {
        self(result);
    }
}

/// Notifier that drops results
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl BookingNotifier for NoopNotifier {
    fn on_booking_complete(&self, _result: &BookingResult) {}
}

/// Environment dependencies for the seating reducer
#[derive(Clone)]
pub struct SeatingEnvironment {
    /// Clock for commit timestamps
    pub clock: Arc<dyn Clock>,
    /// Booking completion callback
    pub notifier: Arc<dyn BookingNotifier>,
}

impl SeatingEnvironment {
    /// Creates a new `SeatingEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn BookingNotifier>) -> Self {
        Self { clock, notifier }
    }

    /// System clock, results dropped
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(NoopNotifier))
    }
}

impl fmt::Debug for SeatingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeatingEnvironment")
            .field("clock", &"<clock>")
            .field("notifier", &"<notifier>")
            .finish()
    }
}
