// src/strategy/implementations.rs

use rand::distributions::{Distribution, Uniform};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::error::ConfigError;
use crate::simulation::config::LeadTimeSampling;
use crate::strategy::traits::{OrderDecision, ReplenishmentPolicy, ReviewContext};

/// Stock level at or below which a new order is due.
///
/// Formula: ROP = AvgDailyDemand * LeadTime + SafetyStock
pub fn reorder_point(avg_daily_demand: f64, lead_time: u32, safety_stock: u32) -> f64 {
    avg_daily_demand * lead_time as f64 + safety_stock as f64
}

// =========================================================================
// Reorder Point / Fixed Order Quantity ("s, Q")
// =========================================================================

/// Orders the SKU's fixed quantity when stock falls to the reorder point.
///
/// The lead time is drawn uniformly from an inclusive day range and feeds
/// both the reorder point and the arrival day. Only one order may be in
/// transit at a time: while an order is open the policy never fires, even
/// under a persistent shortfall.
#[derive(Debug, Clone)]
pub struct ReorderPointPolicy {
    lead_times: Uniform<u32>,
    lead_time_max: u32,
    sampling: LeadTimeSampling,
    rng: ChaCha20Rng,
}

impl ReorderPointPolicy {
    /// Fails unless `1 <= lead_time_min <= lead_time_max`. A zero-day lead
    /// time would schedule an arrival for a day that was already received.
    pub fn new(
        lead_time_min: u32,
        lead_time_max: u32,
        sampling: LeadTimeSampling,
        rng: ChaCha20Rng,
    ) -> Result<Self, ConfigError> {
        if lead_time_min == 0 || lead_time_min > lead_time_max {
            return Err(ConfigError::InvalidLeadTimeRange {
                min: lead_time_min,
                max: lead_time_max,
            });
        }
        Ok(Self {
            lead_times: Uniform::new_inclusive(lead_time_min, lead_time_max),
            lead_time_max,
            sampling,
            rng,
        })
    }

    fn draw_lead_time(&mut self) -> u32 {
        self.lead_times.sample(&mut self.rng)
    }

    fn decide(&self, context: &ReviewContext, lead_time: u32) -> Option<OrderDecision> {
        let rop = reorder_point(context.avg_daily_demand, lead_time, context.safety_stock);
        trace!(day = context.day, stock = context.stock, lead_time, rop, "reorder review");

        if context.stock as f64 <= rop && !context.has_open_order {
            Some(OrderDecision { lead_time })
        } else {
            None
        }
    }
}

impl ReplenishmentPolicy for ReorderPointPolicy {
    fn review(&mut self, context: &ReviewContext) -> Option<OrderDecision> {
        match self.sampling {
            LeadTimeSampling::EveryReview => {
                let lead_time = self.draw_lead_time();
                self.decide(context, lead_time)
            }
            LeadTimeSampling::OnOrder => {
                if context.has_open_order {
                    return None;
                }
                // Above the highest possible ROP no draw could trigger an order
                let ceiling = reorder_point(
                    context.avg_daily_demand,
                    self.lead_time_max,
                    context.safety_stock,
                );
                if context.stock as f64 > ceiling {
                    return None;
                }
                let lead_time = self.draw_lead_time();
                self.decide(context, lead_time)
            }
        }
    }
}
