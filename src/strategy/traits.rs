// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::ledger::InventoryLedger;

/// Snapshot of a SKU handed to the policy at its daily review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewContext {
    pub day: u32,
    pub stock: u64,
    pub safety_stock: u32,
    pub avg_daily_demand: f64,
    /// True while an earlier order is still in transit.
    pub has_open_order: bool,
}

impl ReviewContext {
    pub fn from_ledger(day: u32, ledger: &InventoryLedger) -> Self {
        Self {
            day,
            stock: ledger.stock(),
            safety_stock: ledger.safety_stock,
            avg_daily_demand: ledger.avg_daily_demand,
            has_open_order: ledger.has_open_order(),
        }
    }
}

/// Instruction to place the SKU's fixed-quantity order today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDecision {
    pub lead_time: u32,
}

/// Decides, once per SKU per day after shipping, whether to reorder.
///
/// Policies own their random state, so each SKU needs its own instance.
/// `Send` + `Sync` keep the door open for running SKUs on separate threads.
pub trait ReplenishmentPolicy: Debug + Send + Sync {
    /// Returns `Some` when an order should go out today.
    fn review(&mut self, context: &ReviewContext) -> Option<OrderDecision>;
}
