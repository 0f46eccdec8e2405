//! Selection state machine and booking commit.
//!
//! Seats move `available ⇄ selected` on clicks and `selected → booked` on
//! commit. Booked seats never change again within a session.
//!
//! Callers send commands only. The reducer validates each command, turns it
//! into a crate-private event and applies the event in a single step that
//! updates seat status and the selection together, so no reader can observe
//! them disagreeing.

use crate::builder::SeatMapBuilder;
use crate::environment::SeatingEnvironment;
use crate::error::BookingError;
use crate::reducer::{Effect, Effects, Reducer};
use crate::types::{BookingResult, Money, SeatId, SeatMap, SeatStatus, SeatingState};
use smallvec::{SmallVec, smallvec};

// ============================================================================
// Actions (Commands)
// ============================================================================

/// Commands for a booking session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatingAction {
    /// User clicked a seat
    ToggleSeat {
        /// Clicked seat
        seat_id: SeatId,
    },

    /// User asked to book the current selection
    CommitBooking,

    /// Rebuild the grid against a fresh booked-seat list
    ResetSeatMap {
        /// Seats already booked elsewhere
        booked_ids: Vec<SeatId>,
    },
}

// ============================================================================
// Events
// ============================================================================

/// Validated state changes
///
/// Only the reducer creates events, after checking the command against
/// current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SeatingEvent {
    /// An available seat was selected
    SeatSelected {
        seat_id: SeatId,
    },

    /// A selected seat was released
    SeatDeselected {
        seat_id: SeatId,
    },

    /// The selection was booked
    BookingCommitted {
        result: BookingResult,
    },

    /// A commit was refused; nothing changed
    BookingRejected {
        error: BookingError,
    },

    /// The grid was rebuilt and the selection dropped
    SeatMapRebuilt {
        seat_map: SeatMap,
    },
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for a booking session
///
/// Owns the venue's [`SeatMapBuilder`] so an explicit reset can rebuild the
/// grid with the same layout and tiers.
#[derive(Clone, Debug)]
pub struct SeatingReducer {
    builder: SeatMapBuilder,
}

impl SeatingReducer {
    /// Creates a new `SeatingReducer`
    #[must_use]
    pub const fn new(builder: SeatMapBuilder) -> Self {
        Self { builder }
    }

    /// Venue builder
    #[must_use]
    pub const fn builder(&self) -> &SeatMapBuilder {
        &self.builder
    }

    /// Validates `CommitBooking` and prepares the result
    ///
    /// Runs before any mutation, so a failure leaves state untouched.
    fn validate_commit(
        state: &SeatingState,
        env: &SeatingEnvironment,
    ) -> Result<BookingResult, BookingError> {
        if state.selection.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let seats: Vec<_> = state
            .selected_seats()
            .into_iter()
            .map(|seat| {
                let mut committed = seat.clone();
                committed.status = SeatStatus::Booked;
                committed
            })
            .collect();

        let total_price = Money::checked_sum(seats.iter().map(|seat| seat.price))
            .ok_or(BookingError::PriceOverflow)?;

        Ok(BookingResult {
            seat_ids: seats.iter().map(|seat| seat.id.clone()).collect(),
            seats,
            total_price,
            committed_at: env.clock.now(),
        })
    }

    /// Applies an event to state
    ///
    /// Seat transitions re-check the current status, so a stale event can
    /// never move a booked seat or desynchronise the selection.
    fn apply_event(state: &mut SeatingState, event: &SeatingEvent) {
        match event {
            SeatingEvent::SeatSelected { seat_id } => {
                if let Some(seat) = state
                    .seat_map
                    .seat_mut(seat_id)
                    .filter(|seat| seat.status == SeatStatus::Available)
                {
                    seat.status = SeatStatus::Selected;
                    state.selection.insert(seat_id.clone());
                }
                state.last_error = None;
            }

            SeatingEvent::SeatDeselected { seat_id } => {
                if let Some(seat) = state
                    .seat_map
                    .seat_mut(seat_id)
                    .filter(|seat| seat.status == SeatStatus::Selected)
                {
                    seat.status = SeatStatus::Available;
                    state.selection.remove(seat_id);
                }
                state.last_error = None;
            }

            SeatingEvent::BookingCommitted { result } => {
                for seat_id in &result.seat_ids {
                    if let Some(seat) = state
                        .seat_map
                        .seat_mut(seat_id)
                        .filter(|seat| seat.status == SeatStatus::Selected)
                    {
                        seat.status = SeatStatus::Booked;
                        state.selection.remove(seat_id);
                    }
                }
                state.last_error = None;
            }

            SeatingEvent::BookingRejected { error } => {
                state.last_error = Some(error.clone());
            }

            SeatingEvent::SeatMapRebuilt { seat_map } => {
                state.seat_map = seat_map.clone();
                for seat_id in state.seat_map.ids_with_status(SeatStatus::Selected) {
                    if let Some(seat) = state.seat_map.seat_mut(&seat_id) {
                        seat.status = SeatStatus::Available;
                    }
                }
                state.selection.clear();
                state.last_error = None;
            }
        }
    }
}

impl Reducer for SeatingReducer {
    type State = SeatingState;
    type Action = SeatingAction;
    type Environment = SeatingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            SeatingAction::ToggleSeat { seat_id } => {
                let Some(status) = state.seat_map.seat(&seat_id).map(|seat| seat.status) else {
                    tracing::warn!(seat_id = %seat_id, "Toggle for unknown seat ignored");
                    return SmallVec::new();
                };

                let event = match status {
                    SeatStatus::Available => SeatingEvent::SeatSelected { seat_id },
                    SeatStatus::Selected => SeatingEvent::SeatDeselected { seat_id },
                    SeatStatus::Booked => {
                        tracing::debug!(seat_id = %seat_id, "Booked seat is not clickable");
                        return SmallVec::new();
                    }
                };

                tracing::debug!(?event, "Seat toggled");
                Self::apply_event(state, &event);
                smallvec![Effect::None]
            }

            SeatingAction::CommitBooking => match Self::validate_commit(state, env) {
                Ok(result) => {
                    tracing::info!(
                        seats = result.seat_ids.len(),
                        total = %result.total_price,
                        "Booking committed"
                    );
                    Self::apply_event(
                        state,
                        &SeatingEvent::BookingCommitted {
                            result: result.clone(),
                        },
                    );
                    smallvec![Effect::BookingComplete(result)]
                }
                Err(error) => {
                    tracing::warn!(%error, "Booking rejected");
                    Self::apply_event(state, &SeatingEvent::BookingRejected { error });
                    SmallVec::new()
                }
            },

            SeatingAction::ResetSeatMap { booked_ids } => {
                if !state.selection.is_empty() {
                    tracing::info!(
                        dropped = state.selection.len(),
                        "Rebuilding seat map drops the current selection"
                    );
                }
                let seat_map = self.builder.build(&booked_ids);
                Self::apply_event(state, &SeatingEvent::SeatMapRebuilt { seat_map });
                smallvec![Effect::None]
            }
        }
    }
}
