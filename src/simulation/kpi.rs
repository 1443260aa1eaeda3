// src/simulation/kpi.rs

use serde::Serialize;

use crate::model::ledger::InventoryLedger;

/// Performance summary of one SKU over a finished run.
///
/// Ratio fields fall back to `0.0` whenever their denominator is zero
/// (no demand, no stock on average, no safety stock). Ratios and the
/// average are rounded to two decimals; sums are exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub sku: String,
    pub total_demand: u64,
    pub total_shipped: u64,
    pub total_backorder: u64,
    pub stockout_days: usize,
    pub fill_rate: f64,
    pub order_count: usize,
    pub avg_stock: f64,
    pub inventory_turnover: f64,
    pub stock_safety_ratio: f64,
}

/// Divides, resolving an undefined ratio to zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Rounds to two decimal places, ties to even (so 0.125 becomes 0.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

impl KpiSummary {
    /// Reduces a ledger's full history. All accumulation happens at full
    /// precision; rounding is the last step.
    pub fn from_ledger(ledger: &InventoryLedger) -> Self {
        let orders = ledger.order_history();

        let total_demand: u64 = orders.iter().map(|o| o.demand as u64).sum();
        let total_shipped: u64 = orders.iter().map(|o| o.shipped as u64).sum();
        let total_backorder: u64 = orders.iter().map(|o| o.unfilled as u64).sum();
        let stockout_days = orders.iter().filter(|o| o.unfilled > 0).count();
        let order_count = ledger.purchase_history().len();

        let stock_history = ledger.stock_history();
        let avg_stock = ratio_or_zero(
            stock_history.iter().map(|&s| s as f64).sum(),
            stock_history.len() as f64,
        );

        let fill_rate = ratio_or_zero(total_shipped as f64, total_demand as f64);
        let inventory_turnover = ratio_or_zero(total_shipped as f64, avg_stock);
        let stock_safety_ratio = ratio_or_zero(avg_stock, ledger.safety_stock as f64);

        Self {
            sku: ledger.name.clone(),
            total_demand,
            total_shipped,
            total_backorder,
            stockout_days,
            fill_rate: round2(fill_rate),
            order_count,
            avg_stock: round2(avg_stock),
            inventory_turnover: round2(inventory_turnover),
            stock_safety_ratio: round2(stock_safety_ratio),
        }
    }
}
