// src/error.rs

use thiserror::Error;

/// Rejected simulation setup. Raised before the first day runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("simulation horizon must be at least one day")]
    InvalidHorizon,

    #[error("at least one SKU must be configured")]
    NoSkus,

    #[error("SKU name '{0}' is used more than once")]
    DuplicateSku(String),

    #[error("SKU '{0}': order quantity must be > 0")]
    InvalidOrderQty(String),

    #[error("SKU '{0}': average daily demand must be finite and >= 0")]
    InvalidDemandRate(String),

    #[error("SKU '{0}': demand baseline must be finite and >= 0, trend must be finite")]
    InvalidDemandProfile(String),

    #[error("SKU '{sku}': event multiplier for day offset {day} must be finite and > 0")]
    InvalidEventMultiplier { sku: String, day: usize },

    #[error("weekly seasonality factors must all be finite and > 0")]
    InvalidWeeklyFactors,

    #[error("SKU '{sku}': demand schedule covers {days} days, horizon is {horizon}")]
    ShortDemandSchedule { sku: String, days: usize, horizon: u32 },

    #[error("lead time range [{min}, {max}] is invalid (need 1 <= min <= max)")]
    InvalidLeadTimeRange { min: u32, max: u32 },
}

/// Failure while exporting histories or KPIs.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
