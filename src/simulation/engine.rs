// src/simulation/engine.rs

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::io::demand::DemandGenerator;
use crate::model::ledger::InventoryLedger;
use crate::model::records::DemandRecord;
use crate::simulation::config::SimulationConfig;
use crate::simulation::kpi::KpiSummary;
use crate::simulation::rng::{sku_stream, StreamPurpose};
use crate::strategy::implementations::ReorderPointPolicy;
use crate::strategy::traits::{ReplenishmentPolicy, ReviewContext};

/// Days between periodic progress log lines.
const PROGRESS_INTERVAL: u32 = 30;

/// Everything the driver needs for one SKU: its ledger, its precomputed
/// demand and its own policy instance.
#[derive(Debug)]
pub struct SkuRun {
    pub ledger: InventoryLedger,
    pub demand: Vec<DemandRecord>,
    policy: Box<dyn ReplenishmentPolicy>,
}

impl SkuRun {
    pub fn new(
        ledger: InventoryLedger,
        demand: Vec<DemandRecord>,
        policy: Box<dyn ReplenishmentPolicy>,
    ) -> Self {
        Self {
            ledger,
            demand,
            policy,
        }
    }

    /// One full day for this SKU: receive, ship, review, snapshot.
    fn step(&mut self, day: u32) {
        self.ledger.receive(day);

        let today_demand = self.demand[(day - 1) as usize].demand;
        self.ledger.ship(day, today_demand);

        let context = ReviewContext::from_ledger(day, &self.ledger);
        if let Some(decision) = self.policy.review(&context) {
            self.ledger.place_order(day, decision.lead_time);
        }

        self.ledger.record_stock();
    }
}

/// Day-by-day driver over a fixed horizon.
///
/// Holds no SKU-specific logic. Every SKU is stepped through day `d`, in
/// configuration order, before any SKU sees day `d + 1`.
#[derive(Debug)]
pub struct InventorySimulation {
    horizon_days: u32,
    pub skus: Vec<SkuRun>,
    pub current_day: u32,
}

impl InventorySimulation {
    /// Validates the configuration, precomputes every SKU's demand for the
    /// whole horizon and wires up one reorder-point policy per SKU.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut runs = Vec::with_capacity(config.skus.len());
        for (index, sku) in config.skus.iter().enumerate() {
            let generator =
                DemandGenerator::new(&sku.name, sku.demand.clone(), config.weekly_factors)?;
            let mut noise = sku_stream(config.seed, index, StreamPurpose::DemandNoise);
            let demand = generator.generate(config.horizon_days, &mut noise);

            let policy = ReorderPointPolicy::new(
                config.lead_time_min,
                config.lead_time_max,
                config.lead_time_sampling,
                sku_stream(config.seed, index, StreamPurpose::LeadTime),
            )?;

            runs.push(SkuRun::new(
                InventoryLedger::from_config(sku),
                demand,
                Box::new(policy),
            ));
        }

        info!(
            skus = runs.len(),
            horizon_days = config.horizon_days,
            seed = config.seed,
            sampling = ?config.lead_time_sampling,
            "simulation initialized"
        );

        Self::from_runs(config.horizon_days, runs)
    }

    /// Builds a driver from hand-assembled runs, e.g. with a custom policy
    /// or a fixed demand schedule. Every schedule must cover the horizon
    /// and SKU names must be unique.
    pub fn from_runs(horizon_days: u32, runs: Vec<SkuRun>) -> Result<Self, ConfigError> {
        if horizon_days == 0 {
            return Err(ConfigError::InvalidHorizon);
        }
        if runs.is_empty() {
            return Err(ConfigError::NoSkus);
        }
        let mut seen = HashSet::new();
        for run in &runs {
            if !seen.insert(run.ledger.name.as_str()) {
                return Err(ConfigError::DuplicateSku(run.ledger.name.clone()));
            }
            if run.ledger.order_qty == 0 {
                return Err(ConfigError::InvalidOrderQty(run.ledger.name.clone()));
            }
            if run.demand.len() < horizon_days as usize {
                return Err(ConfigError::ShortDemandSchedule {
                    sku: run.ledger.name.clone(),
                    days: run.demand.len(),
                    horizon: horizon_days,
                });
            }
        }

        Ok(Self {
            horizon_days,
            skus: runs,
            current_day: 1,
        })
    }

    pub fn run(&mut self) {
        while !self.is_finished() {
            self.step();
        }

        for run in &self.skus {
            info!(
                sku = %run.ledger.name,
                stock = run.ledger.stock(),
                backorder = run.ledger.backorder(),
                orders = run.ledger.purchase_history().len(),
                "simulation finished"
            );
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_day > self.horizon_days
    }

    /// Advances every SKU by one day.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        let day = self.current_day;

        for run in &mut self.skus {
            run.step(day);
        }

        if day % PROGRESS_INTERVAL == 0 {
            for run in &self.skus {
                debug!(
                    day,
                    sku = %run.ledger.name,
                    stock = run.ledger.stock(),
                    backorder = run.ledger.backorder(),
                    in_transit = run.ledger.pipeline().in_transit(),
                    "progress"
                );
            }
        }

        self.current_day += 1;
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn ledgers(&self) -> impl Iterator<Item = &InventoryLedger> {
        self.skus.iter().map(|run| &run.ledger)
    }

    pub fn ledger(&self, name: &str) -> Option<&InventoryLedger> {
        self.ledgers().find(|ledger| ledger.name == name)
    }

    /// KPI summaries in SKU order. Only meaningful once the run has finished.
    pub fn kpis(&self) -> Vec<KpiSummary> {
        self.ledgers().map(KpiSummary::from_ledger).collect()
    }
}
