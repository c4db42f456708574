//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Property-wide settings.
    #[serde(default)]
    pub property: PropertyConfig,
    /// Invoice settings.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Loyalty programme settings.
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
    /// Cancellation fee policy.
    #[serde(default)]
    pub cancellation: CancellationConfig,
}

/// Property configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyConfig {
    /// Display name of the property.
    #[serde(default = "default_property_name")]
    pub name: String,
    /// The property's reporting currency, used for display and by the seeder
    /// when it creates rooms. Pricing never reads it: each room quotes in its
    /// own `RoomRate` currency, and bookings and folios inherit that.
    #[serde(default)]
    pub currency: Currency,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            name: default_property_name(),
            currency: Currency::default(),
        }
    }
}

fn default_property_name() -> String {
    "Innkeep".to_string()
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Days between opening a folio and its due date.
    #[serde(default = "default_invoice_due_days")]
    pub invoice_due_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            invoice_due_days: default_invoice_due_days(),
        }
    }
}

fn default_invoice_due_days() -> u32 {
    7
}

/// Loyalty configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    /// Points earned per whole currency unit of realised revenue.
    #[serde(default = "default_points_per_currency_unit")]
    pub points_per_currency_unit: u64,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            points_per_currency_unit: default_points_per_currency_unit(),
        }
    }
}

fn default_points_per_currency_unit() -> u64 {
    1
}

/// Cancellation policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CancellationConfig {
    /// Cancelling at least this many hours before check-in is free.
    #[serde(default = "default_free_cancellation_hours")]
    pub free_cancellation_hours: u32,
    /// Late cancellation fee as a percentage of one night's all-in rate.
    #[serde(default = "default_late_fee_percent")]
    pub late_fee_percent: Decimal,
}

impl Default for CancellationConfig {
    fn default() -> Self {
        Self {
            free_cancellation_hours: default_free_cancellation_hours(),
            late_fee_percent: default_late_fee_percent(),
        }
    }
}

fn default_free_cancellation_hours() -> u32 {
    24
}

fn default_late_fee_percent() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INNKEEP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
