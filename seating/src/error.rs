//! Error types for seat-map configuration and booking.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed venue configuration
///
/// Raised synchronously while validating a layout, resolving tiers or
/// partitioning a row. A config that produces one of these must be corrected
/// before a seat map can be rendered.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Layout declares no rows
    #[error("Layout must have at least one row")]
    ZeroRows,

    /// Layout declares rows without seats
    #[error("Layout must have at least one seat per row")]
    ZeroSeatsPerRow,

    /// Tier configuration declares no tiers
    #[error("Tier configuration must declare at least one tier")]
    NoTiers,

    /// The same tier key was declared twice
    #[error("Tier '{key}' is declared more than once")]
    DuplicateTier {
        /// Offending tier key
        key: String,
    },

    /// More tiers than the color palette can distinguish
    #[error("{declared} tiers declared but the palette only has {palette} colors")]
    TooManyTiers {
        /// Number of declared tiers
        declared: usize,
        /// Number of palette entries
        palette: usize,
    },

    /// Aisle position outside `[0, seats_per_row]`
    #[error("Aisle position {position} is outside a row of {seats_per_row} seats")]
    AisleOutOfRange {
        /// Offending aisle position
        position: usize,
        /// Row width the aisle was checked against
        seats_per_row: usize,
    },

    /// Config file could not be read
    #[error("Failed to read venue config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config document is not valid JSON for a venue
    #[error("Failed to parse venue config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Booking commit failures
///
/// Both variants are detected before any seat is touched, so a failed commit
/// never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Commit requested with nothing selected
    #[error("No seats selected")]
    EmptySelection,

    /// Selection total does not fit in the money type
    #[error("Total price of the selection overflows")]
    PriceOverflow,
}

/// Any error the seating crate can return
#[derive(Error, Debug)]
pub enum SeatingError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Booking problem
    #[error(transparent)]
    Booking(#[from] BookingError),
}
