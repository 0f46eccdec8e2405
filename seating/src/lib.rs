//! # Cinema Seating
//!
//! Seat-state model for an interactive seating chart of a single venue.
//!
//! This crate provides:
//! - Seat map construction from a layout, priced tiers and already-booked ids
//! - Row → tier classification in explicit declaration order
//! - Aisle-aware partitioning of rows into display blocks
//! - The `available ⇄ selected → booked` state machine as a reducer
//! - Atomic booking commit with a completion callback
//!
//! Rendering, persistence and network delivery of bookings belong to the
//! caller. The crate only consumes their inputs and hands back values.
//!
//! ## Example
//!
//! ```no_run
//! use cinema_seating::{BookingSession, SeatId, SeatingEnvironment, VenueConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let booked = [SeatId::from("A1"), SeatId::from("C4")];
//! let mut session = BookingSession::new(
//!     VenueConfig::default(),
//!     &booked,
//!     SeatingEnvironment::detached(),
//! )?;
//!
//! session.toggle(&SeatId::from("A2"));
//! session.toggle(&SeatId::from("D5"));
//!
//! let result = session.commit()?;
//! println!("Booked {:?} for {}", result.seat_ids, result.total_price);
//! # Ok(())
//! # }
//! ```

pub mod booking;
pub mod builder;
pub mod config;
pub mod environment;
pub mod error;
pub mod partition;
pub mod reducer;
pub mod session;
pub mod tier;
pub mod types;

// Re-export commonly used types
pub use booking::{SeatingAction, SeatingReducer};
pub use builder::SeatMapBuilder;
pub use config::{AislePositions, LayoutSpec, TierConfig, TierDefinition, VenueConfig};
pub use environment::{BookingNotifier, Clock, NoopNotifier, SeatingEnvironment, SystemClock};
pub use error::{BookingError, ConfigError, SeatingError};
pub use partition::{RowBlock, RowPartitioner, RowSegment};
pub use reducer::{Effect, Effects, Reducer};
pub use session::BookingSession;
pub use tier::{RowPredicate, TierAssignment, TierClassifier, TierRule};
pub use types::{
    BookingResult, BookingSummary, Money, Seat, SeatColor, SeatId, SeatMap, SeatStatus,
    SeatingState, Selection, TierKey, row_label,
};
