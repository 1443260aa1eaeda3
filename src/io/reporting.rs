// src/io/reporting.rs

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::model::ledger::InventoryLedger;
use crate::simulation::kpi::KpiSummary;

/// Days per reporting month. The last month absorbs any leftover days.
pub const DAYS_PER_MONTH: u32 = 30;
pub const MAX_MONTHS: u32 = 12;

#[derive(Debug, Clone, Serialize)]
struct StockRow<'a> {
    sku: &'a str,
    day: u32,
    stock: u64,
}

#[derive(Debug, Clone, Serialize)]
struct OrderRow<'a> {
    sku: &'a str,
    day: u32,
    demand: u32,
    shipped: u32,
    unfilled: u32,
}

#[derive(Debug, Clone, Serialize)]
struct PurchaseRow<'a> {
    sku: &'a str,
    day: u32,
    qty: u32,
    stock_at_order: u64,
    arrival_day: u32,
}

/// Demand, shipments and average stock for one 30-day bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub demand: u64,
    pub shipped: u64,
    pub avg_stock: f64,
}

/// Month bucket for a 1-based day, capped at [`MAX_MONTHS`]. Day 0 falls
/// in month 1.
pub fn month_of(day: u32) -> u32 {
    (day.saturating_sub(1) / DAYS_PER_MONTH + 1).min(MAX_MONTHS)
}

/// Buckets a finished ledger's history into months, ready for charting.
pub fn monthly_summary(ledger: &InventoryLedger) -> Vec<MonthlySummary> {
    let days = ledger.stock_history().len().max(ledger.order_history().len()) as u32;
    if days == 0 {
        return Vec::new();
    }
    let months = month_of(days) as usize;

    let mut demand = vec![0u64; months];
    let mut shipped = vec![0u64; months];
    let mut stock_sum = vec![0u64; months];
    let mut stock_days = vec![0u32; months];

    for order in ledger.order_history() {
        let m = month_of(order.day) as usize - 1;
        demand[m] += order.demand as u64;
        shipped[m] += order.shipped as u64;
    }
    for (day, &stock) in (1u32..).zip(ledger.stock_history()) {
        let m = month_of(day) as usize - 1;
        stock_sum[m] += stock;
        stock_days[m] += 1;
    }

    (0..months)
        .map(|m| MonthlySummary {
            month: m as u32 + 1,
            demand: demand[m],
            shipped: shipped[m],
            avg_stock: if stock_days[m] > 0 {
                stock_sum[m] as f64 / stock_days[m] as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Human-readable KPI block, one section per SKU.
pub fn format_kpi_report(kpis: &[KpiSummary]) -> String {
    let mut out = String::new();
    for kpi in kpis {
        let rows = [
            ("Total Demand", kpi.total_demand.to_string()),
            ("Total Shipped", kpi.total_shipped.to_string()),
            ("Total Backorder", kpi.total_backorder.to_string()),
            ("Stockout Days", kpi.stockout_days.to_string()),
            ("Fill Rate", format!("{:.2}", kpi.fill_rate)),
            ("Order Count", kpi.order_count.to_string()),
            ("Average Stock", format!("{:.2}", kpi.avg_stock)),
            ("Inventory Turnover", format!("{:.2}", kpi.inventory_turnover)),
            ("AvgStock / SafetyStock", format!("{:.2}", kpi.stock_safety_ratio)),
        ];

        let _ = writeln!(out, "[SKU: {}]", kpi.sku);
        for (label, value) in &rows {
            let _ = writeln!(out, "{:<25}: {}", label, value);
        }
        let _ = writeln!(out, "{}", "-".repeat(40));
    }
    out
}

/// Serializes rows to a CSV file with a header line.
fn write_rows<T: Serialize>(
    path: &Path,
    rows: impl IntoIterator<Item = T>,
) -> Result<usize, ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut count = 0;
    for row in rows {
        wtr.serialize(row)?;
        count += 1;
    }
    wtr.flush()?;

    info!(rows = count, path = %path.display(), "csv exported");
    Ok(count)
}

pub fn write_stock_history<'a>(
    path: &Path,
    ledgers: impl IntoIterator<Item = &'a InventoryLedger>,
) -> Result<usize, ReportError> {
    let rows = ledgers.into_iter().flat_map(|ledger| {
        (1u32..).zip(ledger.stock_history()).map(move |(day, &stock)| StockRow {
            sku: &ledger.name,
            day,
            stock,
        })
    });
    write_rows(path, rows)
}

pub fn write_order_history<'a>(
    path: &Path,
    ledgers: impl IntoIterator<Item = &'a InventoryLedger>,
) -> Result<usize, ReportError> {
    let rows = ledgers.into_iter().flat_map(|ledger| {
        ledger.order_history().iter().map(move |o| OrderRow {
            sku: &ledger.name,
            day: o.day,
            demand: o.demand,
            shipped: o.shipped,
            unfilled: o.unfilled,
        })
    });
    write_rows(path, rows)
}

pub fn write_purchase_history<'a>(
    path: &Path,
    ledgers: impl IntoIterator<Item = &'a InventoryLedger>,
) -> Result<usize, ReportError> {
    let rows = ledgers.into_iter().flat_map(|ledger| {
        ledger.purchase_history().iter().map(move |p| PurchaseRow {
            sku: &ledger.name,
            day: p.day,
            qty: p.qty,
            stock_at_order: p.stock_at_order,
            arrival_day: p.arrival_day,
        })
    });
    write_rows(path, rows)
}

pub fn write_kpi_summary(path: &Path, kpis: &[KpiSummary]) -> Result<usize, ReportError> {
    write_rows(path, kpis)
}

/// Writes all four CSV files into `dir`, creating it if needed.
/// Returns the written paths.
pub fn export_all<'a>(
    dir: &Path,
    ledgers: impl IntoIterator<Item = &'a InventoryLedger> + Clone,
    kpis: &[KpiSummary],
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir)?;

    let stock = dir.join("stock_history.csv");
    let orders = dir.join("order_history.csv");
    let purchases = dir.join("purchase_history.csv");
    let summary = dir.join("kpi_summary.csv");

    write_stock_history(&stock, ledgers.clone())?;
    write_order_history(&orders, ledgers.clone())?;
    write_purchase_history(&purchases, ledgers)?;
    write_kpi_summary(&summary, kpis)?;

    Ok(vec![stock, orders, purchases, summary])
}
