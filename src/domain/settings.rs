//! Application configuration models.
//!
//! Contains the rate card, delivery policy and path settings loaded from
//! `config.toml`. Amounts are written as decimal strings in the file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::money::{decimal, Money};

/// Per-page and per-sheet prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Black & white, one side.
    #[serde(with = "decimal", default = "default_bw_page")]
    pub bw_page: Money,

    /// Colour, one side.
    #[serde(with = "decimal", default = "default_color_page")]
    pub color_page: Money,

    /// Black & white sheet printed on both sides.
    #[serde(with = "decimal", default = "default_bw_sheet_double")]
    pub bw_sheet_double: Money,

    /// Colour sheet printed on both sides.
    #[serde(with = "decimal", default = "default_color_sheet_double")]
    pub color_sheet_double: Money,

    /// Extra per single-sided page on premium paper.
    #[serde(with = "decimal", default = "default_premium_surcharge")]
    pub premium_surcharge: Money,

    /// Extra per single-sided page on glossy paper.
    #[serde(with = "decimal", default = "default_glossy_surcharge")]
    pub glossy_surcharge: Money,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            bw_page: default_bw_page(),
            color_page: default_color_page(),
            bw_sheet_double: default_bw_sheet_double(),
            color_sheet_double: default_color_sheet_double(),
            premium_surcharge: default_premium_surcharge(),
            glossy_surcharge: default_glossy_surcharge(),
        }
    }
}

const fn default_bw_page() -> Money {
    Money::from_minor(150)
}

const fn default_color_page() -> Money {
    Money::from_minor(400)
}

const fn default_bw_sheet_double() -> Money {
    Money::from_minor(250)
}

const fn default_color_sheet_double() -> Money {
    Money::from_minor(800)
}

const fn default_premium_surcharge() -> Money {
    Money::from_minor(50)
}

const fn default_glossy_surcharge() -> Money {
    Money::from_minor(100)
}

/// Delivery charges and defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Flat fee below the free-delivery threshold.
    #[serde(with = "decimal", default = "default_delivery_fee")]
    pub fee: Money,

    /// Cart subtotal at or above which delivery is free.
    #[serde(with = "decimal", default = "default_free_threshold")]
    pub free_threshold: Money,

    /// Location used when checkout does not name one.
    #[serde(default = "default_location")]
    pub default_location: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            fee: default_delivery_fee(),
            free_threshold: default_free_threshold(),
            default_location: default_location(),
        }
    }
}

const fn default_delivery_fee() -> Money {
    Money::from_units(20)
}

const fn default_free_threshold() -> Money {
    Money::from_units(99)
}

fn default_location() -> String {
    "CUTM Bhubaneswar".to_string()
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: RateCard,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".print-shop")
    }

    /// Get the storage database path.
    #[must_use]
    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir().join("shop.db")
    }
}
