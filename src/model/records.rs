// src/model/records.rs

use serde::Serialize;

/// Demand drawn for one SKU on one day. Day indices start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemandRecord {
    pub day: u32,
    pub demand: u32,
}

/// Outcome of shipping against a day's demand.
/// `shipped + unfilled == demand` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub day: u32,
    pub demand: u32,
    pub shipped: u32,
    pub unfilled: u32,
}

/// A replenishment order placed with the supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseRecord {
    pub day: u32,
    pub qty: u32,
    pub stock_at_order: u64,
    pub arrival_day: u32,
}

impl PurchaseRecord {
    pub fn lead_time(&self) -> u32 {
        self.arrival_day - self.day
    }
}

/// One replenishment landing. `backorder_filled + shelved == qty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptRecord {
    pub day: u32,
    pub qty: u32,
    pub backorder_filled: u32,
    pub shelved: u32,
}

/// Goods ordered but not yet on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingArrival {
    pub arrival_day: u32,
    pub qty: u32,
}
