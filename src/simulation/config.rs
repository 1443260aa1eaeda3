// src/simulation/config.rs

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Monday through Sunday demand multipliers, indexed by `(day - 1) % 7`.
pub const DEFAULT_WEEKLY_FACTORS: [f64; 7] = [0.8, 0.9, 1.0, 1.15, 1.25, 1.4, 1.6];

/// When the replenishment policy draws a lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadTimeSampling {
    /// Draw on every daily review, whether or not an order goes out.
    #[default]
    EveryReview,
    /// Draw only when an order could actually be placed.
    OnOrder,
}

/// Shape of one SKU's daily demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub baseline: f64,
    pub trend_rate: f64,
    /// Promotion/event multipliers keyed by 0-based day offset.
    #[serde(default)]
    pub event_multipliers: BTreeMap<usize, f64>,
}

impl DemandProfile {
    pub fn new(baseline: f64, trend_rate: f64) -> Self {
        Self {
            baseline,
            trend_rate,
            event_multipliers: BTreeMap::new(),
        }
    }

    pub fn with_event(mut self, day_offset: usize, multiplier: f64) -> Self {
        self.event_multipliers.insert(day_offset, multiplier);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuConfig {
    pub name: String,
    pub initial_stock: u32,
    pub safety_stock: u32,
    pub order_qty: u32,
    pub avg_daily_demand: f64,
    pub demand: DemandProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub horizon_days: u32,
    pub seed: u64,
    pub weekly_factors: [f64; 7],
    pub lead_time_min: u32,
    pub lead_time_max: u32,
    pub lead_time_sampling: LeadTimeSampling,
    pub skus: Vec<SkuConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            seed: 42,
            weekly_factors: DEFAULT_WEEKLY_FACTORS,
            lead_time_min: 2,
            lead_time_max: 8,
            lead_time_sampling: LeadTimeSampling::EveryReview,
            skus: vec![
                SkuConfig {
                    name: "A001".to_string(),
                    initial_stock: 411,
                    safety_stock: 71,
                    order_qty: 595,
                    avg_daily_demand: 85.0,
                    demand: DemandProfile::new(50.0, 0.10)
                        .with_event(120, 1.8)
                        .with_event(250, 1.5),
                },
                SkuConfig {
                    name: "A002".to_string(),
                    initial_stock: 498,
                    safety_stock: 138,
                    order_qty: 450,
                    avg_daily_demand: 90.0,
                    demand: DemandProfile::new(80.0, -0.05)
                        .with_event(90, 2.0)
                        .with_event(300, 1.6),
                },
                SkuConfig {
                    name: "A003".to_string(),
                    initial_stock: 621,
                    safety_stock: 141,
                    order_qty: 600,
                    avg_daily_demand: 120.0,
                    demand: DemandProfile::new(60.0, 0.20)
                        .with_event(50, 1.8)
                        .with_event(200, 2.0),
                },
            ],
        }
    }
}

impl SimulationConfig {
    /// Checks every parameter the run depends on. Nothing is simulated
    /// until this passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::InvalidHorizon);
        }
        if self.skus.is_empty() {
            return Err(ConfigError::NoSkus);
        }
        if self.weekly_factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(ConfigError::InvalidWeeklyFactors);
        }
        if self.lead_time_min == 0 || self.lead_time_min > self.lead_time_max {
            return Err(ConfigError::InvalidLeadTimeRange {
                min: self.lead_time_min,
                max: self.lead_time_max,
            });
        }

        let mut seen = HashSet::new();
        for sku in &self.skus {
            if !seen.insert(sku.name.as_str()) {
                return Err(ConfigError::DuplicateSku(sku.name.clone()));
            }
            sku.validate()?;
        }
        Ok(())
    }
}

impl SkuConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_qty == 0 {
            return Err(ConfigError::InvalidOrderQty(self.name.clone()));
        }
        if !self.avg_daily_demand.is_finite() || self.avg_daily_demand < 0.0 {
            return Err(ConfigError::InvalidDemandRate(self.name.clone()));
        }

        let profile = &self.demand;
        if !profile.baseline.is_finite() || profile.baseline < 0.0 || !profile.trend_rate.is_finite()
        {
            return Err(ConfigError::InvalidDemandProfile(self.name.clone()));
        }
        for (&day, &multiplier) in &profile.event_multipliers {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::InvalidEventMultiplier {
                    sku: self.name.clone(),
                    day,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.skus.len(), 3);
        assert_eq!(config.horizon_days, 365);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let config = SimulationConfig {
            horizon_days: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidHorizon));
    }

    #[test]
    fn zero_order_qty_is_rejected() {
        let mut config = SimulationConfig::default();
        config.skus[1].order_qty = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidOrderQty("A002".to_string()))
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut config = SimulationConfig::default();
        config.skus[2].name = "A001".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateSku("A001".to_string()))
        );
    }

    #[test]
    fn non_positive_event_multiplier_is_rejected() {
        let mut config = SimulationConfig::default();
        config.skus[0].demand.event_multipliers.insert(10, 0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidEventMultiplier {
                sku: "A001".to_string(),
                day: 10
            })
        );
    }

    #[test]
    fn inverted_lead_time_range_is_rejected() {
        let config = SimulationConfig {
            lead_time_min: 9,
            lead_time_max: 3,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLeadTimeRange { min: 9, max: 3 })
        ));
    }

    #[test]
    fn negative_baseline_is_rejected() {
        let mut config = SimulationConfig::default();
        config.skus[0].demand.baseline = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDemandProfile("A001".to_string()))
        );
    }
}
