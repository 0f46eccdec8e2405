//! Seat map construction from a layout, tiers and already-booked ids.

use crate::config::{LayoutSpec, TierConfig};
use crate::error::ConfigError;
use crate::tier::TierClassifier;
use crate::types::{Seat, SeatId, SeatMap, SeatStatus};
use std::collections::HashSet;

/// Builds seat maps for one venue
///
/// Holds the validated layout and resolved tiers so the same venue can be
/// rebuilt against a fresh booked-seat list.
#[derive(Clone, Debug)]
pub struct SeatMapBuilder {
    layout: LayoutSpec,
    classifier: TierClassifier,
}

impl SeatMapBuilder {
    /// Validates the layout and resolves the tiers
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed layout or tier config.
    pub fn new(layout: LayoutSpec, tiers: &TierConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        let classifier = TierClassifier::new(tiers)?;
        Ok(Self { layout, classifier })
    }

    /// One-shot build
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed layout or tier config.
    pub fn build_once(
        layout: LayoutSpec,
        tiers: &TierConfig,
        booked_ids: &[SeatId],
    ) -> Result<SeatMap, ConfigError> {
        Ok(Self::new(layout, tiers)?.build(booked_ids))
    }

    /// Layout this builder produces
    #[must_use]
    pub const fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Resolved tiers
    #[must_use]
    pub const fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    /// Builds a fresh grid; seats in `booked_ids` start booked
    ///
    /// Nothing is selected in the result. Ids that name no seat in the grid
    /// are ignored.
    #[must_use]
    pub fn build(&self, booked_ids: &[SeatId]) -> SeatMap {
        let booked: HashSet<&SeatId> = booked_ids.iter().collect();
        let mut matched = 0usize;

        let rows: Vec<Vec<Seat>> = (0..self.layout.rows)
            .map(|row| {
                let tier = self.classifier.classify(row);
                (0..self.layout.seats_per_row)
                    .map(|column| {
                        let id = SeatId::new(row, column);
                        let status = if booked.contains(&id) {
                            matched += 1;
                            SeatStatus::Booked
                        } else {
                            SeatStatus::Available
                        };
                        Seat {
                            id,
                            row,
                            column,
                            tier: tier.key.clone(),
                            price: tier.price,
                            color: tier.color,
                            status,
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        if matched < booked.len() {
            tracing::warn!(
                unknown = booked.len() - matched,
                "Booked seat ids outside the grid were ignored"
            );
        }

        tracing::debug!(
            rows = self.layout.rows,
            seats_per_row = self.layout.seats_per_row,
            booked = matched,
            "Seat map built"
        );

        SeatMap::from_rows(rows)
    }
}
