// src/io/demand.rs

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ConfigError;
use crate::model::records::DemandRecord;
use crate::simulation::config::DemandProfile;

/// Noise standard deviation as a fraction of the baseline.
pub const NOISE_FRACTION: f64 = 0.10;

/// Daily demand for one SKU: linear trend, weekly seasonality, event
/// spikes and Gaussian noise.
///
/// The generator owns no random state. Callers hand in the SKU's own
/// stream so that draws for different SKUs never interleave.
#[derive(Debug, Clone)]
pub struct DemandGenerator {
    profile: DemandProfile,
    weekly_factors: [f64; 7],
    noise: Normal<f64>,
}

impl DemandGenerator {
    pub fn new(
        sku_name: &str,
        profile: DemandProfile,
        weekly_factors: [f64; 7],
    ) -> Result<Self, ConfigError> {
        let noise = Normal::new(0.0, profile.baseline * NOISE_FRACTION)
            .map_err(|_| ConfigError::InvalidDemandProfile(sku_name.to_string()))?;
        Ok(Self {
            profile,
            weekly_factors,
            noise,
        })
    }

    /// Noise-free demand for `day` (1-based). Day 0 is treated as day 1.
    pub fn expected_demand(&self, day: u32) -> f64 {
        let offset = day.saturating_sub(1) as usize;
        let trend = self.profile.baseline + self.profile.trend_rate * offset as f64;
        let seasonal = self.weekly_factors[offset % 7];
        let event = self
            .profile
            .event_multipliers
            .get(&offset)
            .copied()
            .unwrap_or(1.0);
        trend * seasonal * event
    }

    /// Realized demand for `day`: expected demand plus one noise draw,
    /// floored and clamped at zero.
    pub fn sample_day<R: Rng + ?Sized>(&self, day: u32, rng: &mut R) -> u32 {
        let value = self.expected_demand(day) + self.noise.sample(rng);
        // `as` saturates, so the clamp only has to deal with the low side
        value.floor().max(0.0) as u32
    }

    /// Precomputes the whole horizon, days `1..=horizon_days`.
    pub fn generate<R: Rng + ?Sized>(&self, horizon_days: u32, rng: &mut R) -> Vec<DemandRecord> {
        (1..=horizon_days)
            .map(|day| DemandRecord {
                day,
                demand: self.sample_day(day, rng),
            })
            .collect()
    }
}

/// Generates a demand schedule where every day has the exact same order amount.
/// Useful for testing the ledger and policy without noise.
pub fn generate_constant_demand(horizon_days: u32, value: u32) -> Vec<DemandRecord> {
    (1..=horizon_days)
        .map(|day| DemandRecord { day, demand: value })
        .collect()
}
