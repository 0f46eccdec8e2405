//! Domain types for the seating chart.
//!
//! Value objects (ids, money, colors), the seat entity, the seat map grid,
//! the selection view and the session state that keeps both consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Row label for a zero-based row index
///
/// Rows `0..26` map to `A..Z`. Past `Z` labels continue spreadsheet-style:
/// `AA, AB, .., AZ, BA, ..`.
#[must_use]
pub fn row_label(row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26 so the cast is lossless
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Identifier of a seat: row label followed by the 1-based column number
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Creates the id for a zero-based `(row, column)` position
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        Self(format!("{}{}", row_label(row), column + 1))
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SeatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a seat tier as declared in the tier configuration
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierKey(String);

impl TierKey {
    /// Creates a tier key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TierKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Money Value Object
// ============================================================================

/// Non-negative price in minor currency units (paise, cents)
///
/// Integer arithmetic only. Decimal prices from configuration are converted
/// with [`Money::from_decimal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Minor units per major unit
    pub const MINOR_PER_MAJOR: u64 = 100;

    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates a `Money` value from whole major units
    ///
    /// Saturates at the largest representable amount.
    #[must_use]
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(Self::MINOR_PER_MAJOR))
    }

    /// Converts a decimal major-unit amount, rounding to the nearest minor unit
    ///
    /// Returns `None` for negative, non-finite or unrepresentable amounts.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_decimal(major: f64) -> Option<Self> {
        if !major.is_finite() || major < 0.0 {
            return None;
        }
        let minor = (major * Self::MINOR_PER_MAJOR as f64).round();
        // u64::MAX is not exactly representable; stay strictly below 2^64
        if minor >= 18_446_744_073_709_551_616.0 {
            return None;
        }
        Some(Self(minor as u64))
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Whole major units, rounded down
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.0 / Self::MINOR_PER_MAJOR
    }

    /// Adds two amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Sums an iterator of amounts, `None` on overflow
    #[must_use]
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Formats the amount behind a currency symbol, e.g. `₹550` or `₹149.50`
    #[must_use]
    pub fn with_currency(&self, currency: &str) -> String {
        format!("{currency}{self}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fraction = self.0 % Self::MINOR_PER_MAJOR;
        if fraction == 0 {
            write!(f, "{}", self.major())
        } else {
            write!(f, "{}.{fraction:02}", self.major())
        }
    }
}

// ============================================================================
// Display Palette
// ============================================================================

/// Display color of a seat tier
///
/// The palette is closed: a venue cannot declare more tiers than there are
/// variants here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatColor {
    /// Blue
    Blue,
    /// Purple
    Purple,
    /// Yellow
    Yellow,
    /// Green
    Green,
    /// Red
    Red,
    /// Indigo
    Indigo,
}

impl SeatColor {
    /// Palette in assignment order
    pub const PALETTE: [Self; 6] = [
        Self::Blue,
        Self::Purple,
        Self::Yellow,
        Self::Green,
        Self::Red,
        Self::Indigo,
    ];

    /// Palette entry for a tier declared at `index`, `None` past the end
    #[must_use]
    pub fn for_index(index: usize) -> Option<Self> {
        Self::PALETTE.get(index).copied()
    }

    /// Lowercase color name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Red => "red",
            Self::Indigo => "indigo",
        }
    }
}

impl fmt::Display for SeatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Seat
// ============================================================================

/// Seat status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Free to select
    Available,
    /// Marked by the user, not yet committed
    Selected,
    /// Committed (terminal within a session)
    Booked,
}

/// A single seat of the grid
///
/// Everything except `status` is fixed when the seat map is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat identifier (`A1`, `B12`, ..)
    pub id: SeatId,
    /// Zero-based row index
    pub row: usize,
    /// Zero-based column index
    pub column: usize,
    /// Tier the row was classified into
    pub tier: TierKey,
    /// Price captured from the tier at build time
    pub price: Money,
    /// Tier display color
    pub color: SeatColor,
    /// Current status
    pub status: SeatStatus,
}

impl Seat {
    /// 1-based seat number within the row
    #[must_use]
    pub const fn number(&self) -> usize {
        self.column + 1
    }

    /// Whether a click can change this seat
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.status != SeatStatus::Booked
    }
}

// ============================================================================
// Seat Map
// ============================================================================

/// Grid of seats, `row_count × seats_per_row`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatMap {
    rows: Vec<Vec<Seat>>,
    #[serde(skip)]
    index: HashMap<SeatId, (usize, usize)>,
}

impl SeatMap {
    /// Builds the id index over a finished grid
    pub(crate) fn from_rows(rows: Vec<Vec<Seat>>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(c, seat)| (seat.id.clone(), (r, c)))
            })
            .collect();
        Self { rows, index }
    }

    /// Looks up a seat by id
    #[must_use]
    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        let &(r, c) = self.index.get(id)?;
        self.rows.get(r)?.get(c)
    }

    pub(crate) fn seat_mut(&mut self, id: &SeatId) -> Option<&mut Seat> {
        let &(r, c) = self.index.get(id)?;
        self.rows.get_mut(r)?.get_mut(c)
    }

    /// All rows in order
    #[must_use]
    pub fn rows(&self) -> &[Vec<Seat>] {
        &self.rows
    }

    /// Seats of one row
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Seat]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterates every seat row by row
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.rows.iter().flatten()
    }

    /// Total number of seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the map has no seats
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of seats in each row
    #[must_use]
    pub fn seats_per_row(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of seats in the given status
    #[must_use]
    pub fn count_by_status(&self, status: SeatStatus) -> usize {
        self.iter().filter(|seat| seat.status == status).count()
    }

    /// Ids of seats in the given status, row by row
    #[must_use]
    pub fn ids_with_status(&self, status: SeatStatus) -> Vec<SeatId> {
        self.iter()
            .filter(|seat| seat.status == status)
            .map(|seat| seat.id.clone())
            .collect()
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Seats the user has marked, in click order
///
/// Only the reducer mutates it, always together with the matching seat status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<SeatId>,
}

impl Selection {
    /// Creates an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Selected ids in insertion order
    #[must_use]
    pub fn ids(&self) -> &[SeatId] {
        &self.ids
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the seat is selected
    #[must_use]
    pub fn contains(&self, id: &SeatId) -> bool {
        self.ids.contains(id)
    }

    /// Adds an id; returns `false` if it was already present
    pub(crate) fn insert(&mut self, id: SeatId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes an id; returns `false` if it was not present
    pub(crate) fn remove(&mut self, id: &SeatId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|x| x != id);
        self.ids.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }
}

// ============================================================================
// Booking Result & Summary
// ============================================================================

/// Outcome of a successful commit, handed to the completion callback
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    /// Committed seats in selection order, with status `booked`
    pub seats: Vec<Seat>,
    /// Sum of the committed seats' prices
    pub total_price: Money,
    /// Ids of the committed seats in selection order
    pub seat_ids: Vec<SeatId>,
    /// When the commit happened
    pub committed_at: DateTime<Utc>,
}

/// Running totals of the current selection
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    /// Selected ids in click order
    pub seat_ids: Vec<SeatId>,
    /// Number of selected seats
    pub count: usize,
    /// Running total
    pub total: Money,
}

impl BookingSummary {
    /// Whether a commit would be accepted
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.count > 0
    }

    /// Selected ids joined for display, e.g. `A1, A2`
    #[must_use]
    pub fn seat_list(&self) -> String {
        self.seat_ids
            .iter()
            .map(SeatId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Call-to-action text for the booking button
    #[must_use]
    pub fn action_label(&self, currency: &str) -> String {
        if self.is_bookable() {
            format!(
                "Book {} Seat(s) • {}",
                self.count,
                self.total.with_currency(currency)
            )
        } else {
            "Select seats".to_string()
        }
    }
}

// ============================================================================
// Session State
// ============================================================================

/// State owned by one booking session
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatingState {
    /// Current grid
    pub seat_map: SeatMap,
    /// Current selection, consistent with seat statuses
    pub selection: Selection,
    /// Last rejected command
    #[serde(skip)]
    pub last_error: Option<crate::error::BookingError>,
}

impl SeatingState {
    /// Creates a state over a freshly built map with nothing selected
    #[must_use]
    pub const fn new(seat_map: SeatMap) -> Self {
        Self {
            seat_map,
            selection: Selection::new(),
            last_error: None,
        }
    }

    /// Selected seats in selection order
    #[must_use]
    pub fn selected_seats(&self) -> Vec<&Seat> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.seat_map.seat(id))
            .collect()
    }

    /// Running totals of the selection
    ///
    /// Saturates instead of failing; commit is where overflow is rejected.
    #[must_use]
    pub fn summary(&self) -> BookingSummary {
        let total = self
            .selected_seats()
            .iter()
            .fold(Money::ZERO, |acc, seat| {
                acc.checked_add(seat.price).unwrap_or(Money::from_minor(u64::MAX))
            });
        BookingSummary {
            seat_ids: self.selection.ids().to_vec(),
            count: self.selection.len(),
            total,
        }
    }

    /// Whether the selection holds exactly the seats whose status is `selected`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut by_status = self.seat_map.ids_with_status(SeatStatus::Selected);
        let mut selected = self.selection.ids().to_vec();
        by_status.sort();
        selected.sort();
        selected.dedup();
        selected.len() == self.selection.len() && by_status == selected
    }
}
