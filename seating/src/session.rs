//! Booking session: the single owner of seat-map state.
//!
//! A session feeds actions through [`SeatingReducer`] one at a time and runs
//! the returned effects. Every method takes `&mut self`, so one session
//! serves exactly one actor. Coordinating sessions that share physical seats
//! is left to an external booking service.

use crate::booking::{SeatingAction, SeatingReducer};
use crate::builder::SeatMapBuilder;
use crate::config::VenueConfig;
use crate::environment::SeatingEnvironment;
use crate::error::{BookingError, ConfigError};
use crate::partition::{RowPartitioner, RowSegment};
use crate::reducer::{Effect, Effects, Reducer};
use crate::types::{BookingResult, BookingSummary, SeatId, SeatMap, SeatStatus, SeatingState, Selection};

/// Interactive seating chart for one venue and one user
#[derive(Debug)]
pub struct BookingSession {
    config: VenueConfig,
    reducer: SeatingReducer,
    environment: SeatingEnvironment,
    state: SeatingState,
}

impl BookingSession {
    /// Starts a session with a freshly built seat map
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the venue layout or tiers are malformed.
    pub fn new(
        config: VenueConfig,
        booked_ids: &[SeatId],
        environment: SeatingEnvironment,
    ) -> Result<Self, ConfigError> {
        let builder = SeatMapBuilder::new(config.layout.clone(), &config.tiers)?;
        let state = SeatingState::new(builder.build(booked_ids));

        tracing::info!(
            title = %config.title,
            seats = state.seat_map.len(),
            booked = state.seat_map.count_by_status(SeatStatus::Booked),
            "Booking session started"
        );

        Ok(Self {
            config,
            reducer: SeatingReducer::new(builder),
            environment,
            state,
        })
    }

    /// Dispatches an action and executes the resulting effects
    ///
    /// Returns the effects after they have run.
    pub fn send(&mut self, action: SeatingAction) -> Effects {
        let effects = self
            .reducer
            .reduce(&mut self.state, action, &self.environment);
        for effect in &effects {
            self.execute(effect);
        }
        effects
    }

    fn execute(&self, effect: &Effect) {
        match effect {
            Effect::None => {}
            Effect::BookingComplete(result) => {
                self.environment.notifier.on_booking_complete(result);
            }
        }
    }

    /// Toggles a seat between available and selected
    ///
    /// Booked and unknown seats are left alone. Returns the seat's status
    /// afterwards, or `None` if no such seat exists.
    pub fn toggle(&mut self, seat_id: &SeatId) -> Option<SeatStatus> {
        self.send(SeatingAction::ToggleSeat {
            seat_id: seat_id.clone(),
        });
        self.state.seat_map.seat(seat_id).map(|seat| seat.status)
    }

    /// Books the current selection
    ///
    /// On success the selected seats are booked, the selection is cleared and
    /// the notifier has received the result.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptySelection`] if nothing is selected and
    /// [`BookingError::PriceOverflow`] if the total cannot be represented.
    /// State is unchanged in both cases.
    pub fn commit(&mut self) -> Result<BookingResult, BookingError> {
        let effects = self.send(SeatingAction::CommitBooking);
        effects
            .into_iter()
            .find_map(|effect| match effect {
                Effect::BookingComplete(result) => Some(result),
                Effect::None => None,
            })
            .ok_or_else(|| {
                self.state
                    .last_error
                    .clone()
                    .unwrap_or(BookingError::EmptySelection)
            })
    }

    /// Rebuilds the grid against a fresh booked-seat list
    ///
    /// Drops the current selection.
    pub fn rebuild(&mut self, booked_ids: &[SeatId]) {
        self.send(SeatingAction::ResetSeatMap {
            booked_ids: booked_ids.to_vec(),
        });
    }

    /// Row with its aisle gaps applied, for rendering
    ///
    /// Unknown rows yield no segments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AisleOutOfRange`] if the configured aisles do not
    /// fit the row.
    pub fn row_layout(&self, row: usize) -> Result<Vec<RowSegment<'_>>, ConfigError> {
        match self.state.seat_map.row(row) {
            Some(seats) => RowPartitioner::row_layout(seats, self.config.layout.aisles.as_slice()),
            None => Ok(Vec::new()),
        }
    }

    /// Running totals of the current selection
    #[must_use]
    pub fn summary(&self) -> BookingSummary {
        self.state.summary()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SeatingState {
        &self.state
    }

    /// Current grid
    #[must_use]
    pub const fn seat_map(&self) -> &SeatMap {
        &self.state.seat_map
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.state.selection
    }

    /// Venue configuration
    #[must_use]
    pub const fn config(&self) -> &VenueConfig {
        &self.config
    }

    /// Currency symbol for display
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.config.currency
    }
}
