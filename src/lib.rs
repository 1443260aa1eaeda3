//! Day-by-day inventory simulation for a handful of SKUs under stochastic
//! demand, with a reorder-point / fixed-quantity replenishment policy.
//!
//! The daily sequence per SKU is receive, ship, review, snapshot. See
//! [`simulation::engine::InventorySimulation`] for the driver and
//! [`simulation::kpi::KpiSummary`] for the end-of-run indicators.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, ReportError};
pub use model::ledger::InventoryLedger;
pub use simulation::config::{DemandProfile, LeadTimeSampling, SimulationConfig, SkuConfig};
pub use simulation::engine::InventorySimulation;
pub use simulation::kpi::KpiSummary;
