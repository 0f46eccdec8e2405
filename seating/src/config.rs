//! Venue configuration: layout, tiers and display pass-throughs.
//!
//! Loads from JSON documents or from environment variables with sensible
//! defaults. The defaults describe an 8-row cinema hall with three tiers.

use crate::error::ConfigError;
use crate::tier::TierClassifier;
use crate::types::{Money, SeatColor, TierKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::Path;

/// Aisle positions of a row
///
/// Accepts either a single integer or an array in JSON and always stores a
/// sequence. Positions keep the order they were given in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AisleInput", into = "Vec<usize>")]
pub struct AislePositions(Vec<usize>);

#[derive(Deserialize)]
#[serde(untagged)]
enum AisleInput {
    Single(usize),
    Many(Vec<usize>),
}

impl From<AisleInput> for AislePositions {
    fn from(input: AisleInput) -> Self {
        match input {
            AisleInput::Single(position) => Self(vec![position]),
            AisleInput::Many(positions) => Self(positions),
        }
    }
}

impl From<AislePositions> for Vec<usize> {
    fn from(aisles: AislePositions) -> Self {
        aisles.0
    }
}

impl From<usize> for AislePositions {
    fn from(position: usize) -> Self {
        Self(vec![position])
    }
}

impl From<Vec<usize>> for AislePositions {
    fn from(positions: Vec<usize>) -> Self {
        Self(positions)
    }
}

impl AislePositions {
    /// No aisles
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Positions in caller order
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Shape of the seat grid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Number of rows
    pub rows: usize,
    /// Number of seats in every row
    pub seats_per_row: usize,
    /// Aisle gaps, each in `[0, seats_per_row]`
    #[serde(default, alias = "aisle_position")]
    pub aisles: AislePositions,
}

impl LayoutSpec {
    /// Creates a layout
    #[must_use]
    pub fn new(rows: usize, seats_per_row: usize, aisles: impl Into<AislePositions>) -> Self {
        Self {
            rows,
            seats_per_row,
            aisles: aisles.into(),
        }
    }

    /// Checks dimensions and aisle bounds
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero dimension or an aisle outside the row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.seats_per_row == 0 {
            return Err(ConfigError::ZeroSeatsPerRow);
        }
        if let Some(&position) = self
            .aisles
            .as_slice()
            .iter()
            .find(|&&p| p > self.seats_per_row)
        {
            return Err(ConfigError::AisleOutOfRange {
                position,
                seats_per_row: self.seats_per_row,
            });
        }
        Ok(())
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::new(8, 12, 5)
    }
}

/// One declared tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Tier key
    pub key: TierKey,
    /// Display name
    pub name: String,
    /// Price of every seat in the tier, a decimal amount in the config file
    #[serde(with = "decimal_price")]
    pub price: Money,
    /// Rows the tier covers
    #[serde(default)]
    pub rows: BTreeSet<usize>,
    /// Explicit display color; otherwise assigned by declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SeatColor>,
}

impl TierDefinition {
    /// Creates a tier without an explicit color
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        rows: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            key: TierKey::new(key),
            name: name.into(),
            price: Money::from_major(price),
            rows: rows.into_iter().collect(),
            color: None,
        }
    }

    /// Sets a price that is not a whole amount
    #[must_use]
    pub const fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Pins the display color
    #[must_use]
    pub const fn with_color(mut self, color: SeatColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Prices appear in config files as decimal major-unit amounts (`149.5`)
/// and are held as minor units.
mod decimal_price {
    use crate::types::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        price: &Money,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if price.minor() % Money::MINOR_PER_MAJOR == 0 {
            serializer.serialize_u64(price.major())
        } else {
            #[allow(clippy::cast_precision_loss)]
            let major = price.minor() as f64 / Money::MINOR_PER_MAJOR as f64;
            serializer.serialize_f64(major)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            D::Error::custom(format!("price must be a non-negative amount, got {amount}"))
        })
    }
}

/// Tiers in declaration order
///
/// Order matters: the first tier covering a row wins, and the first tier is
/// the fallback for rows no tier covers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierConfig {
    tiers: Vec<TierDefinition>,
}

impl TierConfig {
    /// Creates a config from tiers in declaration order
    #[must_use]
    pub const fn new(tiers: Vec<TierDefinition>) -> Self {
        Self { tiers }
    }

    /// Appends a tier
    #[must_use]
    pub fn with_tier(mut self, tier: TierDefinition) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Declared tiers
    #[must_use]
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Whether no tier is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Stock cinema tiers: Regular, Premium, VIP
    #[must_use]
    pub fn cinema() -> Self {
        Self::new(vec![
            TierDefinition::new("regular", "Regular", 150, [0, 1, 2]),
            TierDefinition::new("premium", "Premium", 250, [3, 4, 5]),
            TierDefinition::new("vip", "VIP", 350, [6, 7]),
        ])
    }
}

/// Complete venue configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Chart title
    #[serde(default = "default_title")]
    pub title: String,
    /// Chart subtitle
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// Currency symbol, only used for display
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Grid layout
    pub layout: LayoutSpec,
    /// Tiers in declaration order
    pub tiers: TierConfig,
}

fn default_title() -> String {
    "Cinema Hall Booking".to_string()
}

fn default_subtitle() -> String {
    "Select your preferred seats".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            currency: default_currency(),
            layout: LayoutSpec::default(),
            tiers: TierConfig::cinema(),
        }
    }
}

impl VenueConfig {
    /// Parses and validates a JSON document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`VenueConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`VenueConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Loads configuration from environment variables
    ///
    /// - `SEATING_CONFIG`: path to a JSON venue file (stock cinema if unset)
    /// - `SEATING_CURRENCY`: overrides the currency symbol
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the referenced file is unreadable or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("SEATING_CONFIG") {
            Ok(path) => {
                tracing::info!(path = %path, "Loading venue config");
                Self::from_path(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(currency) = env::var("SEATING_CURRENCY") {
            config.currency = currency;
        }

        Ok(config)
    }

    /// Checks the layout and resolves the tiers
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        TierClassifier::new(&self.tiers)?;
        Ok(())
    }
}
