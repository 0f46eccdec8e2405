//! Aisle-aware splitting of a row into display blocks.

use crate::error::ConfigError;
use crate::types::Seat;
use std::ops::Range;

/// One block of a partitioned row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowBlock {
    /// Contiguous seat indices `[start, end)`
    Seats(Range<usize>),
    /// Zero-width aisle marker
    Gap,
}

/// A block mapped onto the seats of a row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowSegment<'a> {
    /// Seats to render side by side
    Seats(&'a [Seat]),
    /// Aisle
    Gap,
}

/// Splits rows around aisle positions
#[derive(Clone, Copy, Debug, Default)]
pub struct RowPartitioner;

impl RowPartitioner {
    /// Partitions a row of `seats_per_row` seats
    ///
    /// Aisles are consumed in the order given: each one closes the block that
    /// started at the previous boundary and is followed by a [`RowBlock::Gap`].
    /// The last block runs to the end of the row. An aisle smaller than the
    /// one before it yields an empty (reversed) range, which is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AisleOutOfRange`] if an aisle lies outside
    /// `[0, seats_per_row]`.
    pub fn partition(seats_per_row: usize, aisles: &[usize]) -> Result<Vec<RowBlock>, ConfigError> {
        if let Some(&position) = aisles.iter().find(|&&a| a > seats_per_row) {
            return Err(ConfigError::AisleOutOfRange {
                position,
                seats_per_row,
            });
        }

        let mut blocks = Vec::with_capacity(aisles.len() * 2 + 1);
        let mut last = 0;
        for &aisle in aisles {
            blocks.push(RowBlock::Seats(last..aisle));
            blocks.push(RowBlock::Gap);
            last = aisle;
        }
        blocks.push(RowBlock::Seats(last..seats_per_row));
        Ok(blocks)
    }

    /// Partitions a row and slices its seats per block
    ///
    /// Reversed ranges produce empty slices.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AisleOutOfRange`] as [`RowPartitioner::partition`].
    pub fn row_layout<'a>(
        seats: &'a [Seat],
        aisles: &[usize],
    ) -> Result<Vec<RowSegment<'a>>, ConfigError> {
        let blocks = Self::partition(seats.len(), aisles)?;
        Ok(blocks
            .into_iter()
            .map(|block| match block {
                RowBlock::Seats(range) => RowSegment::Seats(seats.get(range).unwrap_or(&[])),
                RowBlock::Gap => RowSegment::Gap,
            })
            .collect())
    }
}
