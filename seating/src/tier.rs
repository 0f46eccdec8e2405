//! Row → tier classification.
//!
//! The tier config is resolved once into an ordered list of
//! `(RowPredicate, TierAssignment)` rules. Classification scans the rules in
//! declaration order, so overlaps go to the earlier tier and uncovered rows
//! fall back to the first declared tier.

use crate::config::TierConfig;
use crate::error::ConfigError;
use crate::types::{Money, SeatColor, TierKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Everything a seat inherits from its tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignment {
    /// Tier key
    pub key: TierKey,
    /// Display name
    pub name: String,
    /// Seat price
    pub price: Money,
    /// Display color
    pub color: SeatColor,
}

/// Which rows a rule applies to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowPredicate {
    /// Any of the listed rows
    AnyOf(BTreeSet<usize>),
}

impl RowPredicate {
    /// Whether the predicate holds for `row`
    #[must_use]
    pub fn matches(&self, row: usize) -> bool {
        match self {
            Self::AnyOf(rows) => rows.contains(&row),
        }
    }
}

/// A resolved classification rule
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierRule {
    /// Rows the rule covers
    pub predicate: RowPredicate,
    /// Tier handed out on a match
    pub tier: TierAssignment,
}

/// Resolved tier configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierClassifier {
    rules: Vec<TierRule>,
    fallback: TierAssignment,
}

impl TierClassifier {
    /// Resolves a tier config into classification rules
    ///
    /// Tiers without an explicit color take the palette entry at their
    /// declaration index.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoTiers`] if the config is empty
    /// - [`ConfigError::TooManyTiers`] if tiers outnumber palette entries
    /// - [`ConfigError::DuplicateTier`] if a key is declared twice
    pub fn new(config: &TierConfig) -> Result<Self, ConfigError> {
        let tiers = config.tiers();
        if tiers.is_empty() {
            return Err(ConfigError::NoTiers);
        }
        if tiers.len() > SeatColor::PALETTE.len() {
            return Err(ConfigError::TooManyTiers {
                declared: tiers.len(),
                palette: SeatColor::PALETTE.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(tiers.len());
        for (index, def) in tiers.iter().enumerate() {
            if !seen.insert(&def.key) {
                return Err(ConfigError::DuplicateTier {
                    key: def.key.to_string(),
                });
            }
            let color = match def.color.or_else(|| SeatColor::for_index(index)) {
                Some(color) => color,
                None => {
                    return Err(ConfigError::TooManyTiers {
                        declared: tiers.len(),
                        palette: SeatColor::PALETTE.len(),
                    });
                }
            };
            rules.push(TierRule {
                predicate: RowPredicate::AnyOf(def.rows.clone()),
                tier: TierAssignment {
                    key: def.key.clone(),
                    name: def.name.clone(),
                    price: def.price,
                    color,
                },
            });
        }

        let Some(fallback) = rules.first().map(|rule| rule.tier.clone()) else {
            return Err(ConfigError::NoTiers);
        };

        tracing::debug!(
            tiers = rules.len(),
            fallback = %fallback.key,
            "Tier classifier resolved"
        );
        Ok(Self { rules, fallback })
    }

    /// Tier for a row: first matching rule, else the first declared tier
    #[must_use]
    pub fn classify(&self, row: usize) -> &TierAssignment {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(row))
            .map_or(&self.fallback, |rule| &rule.tier)
    }

    /// First declared tier
    #[must_use]
    pub const fn fallback(&self) -> &TierAssignment {
        &self.fallback
    }

    /// Rules in declaration order
    #[must_use]
    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Tier by key
    #[must_use]
    pub fn tier(&self, key: &TierKey) -> Option<&TierAssignment> {
        self.rules
            .iter()
            .map(|rule| &rule.tier)
            .find(|tier| &tier.key == key)
    }
}
