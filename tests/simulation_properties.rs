//! Whole-run properties of the simulation, checked on the reference
//! scenario and a few hand-built ones.

use inventory_sim::io::demand::generate_constant_demand;
use inventory_sim::model::records::DemandRecord;
use inventory_sim::simulation::engine::SkuRun;
use inventory_sim::simulation::rng::{sku_stream, StreamPurpose};
use inventory_sim::strategy::implementations::ReorderPointPolicy;
use inventory_sim::{
    InventoryLedger, InventorySimulation, KpiSummary, LeadTimeSampling, SimulationConfig,
};

fn finished(config: SimulationConfig) -> InventorySimulation {
    let mut sim = InventorySimulation::new(config).unwrap();
    sim.run();
    sim
}

fn all_configs() -> Vec<SimulationConfig> {
    let mut configs = Vec::new();
    for seed in [1, 42, 2024] {
        for sampling in [LeadTimeSampling::EveryReview, LeadTimeSampling::OnOrder] {
            configs.push(SimulationConfig {
                seed,
                lead_time_sampling: sampling,
                ..SimulationConfig::default()
            });
        }
    }
    configs
}

#[test]
fn goods_are_conserved() {
    for config in all_configs() {
        let sim = finished(config);
        for ledger in sim.ledgers() {
            let demand: u64 = ledger.order_history().iter().map(|o| o.demand as u64).sum();
            let shipped: u64 = ledger.order_history().iter().map(|o| o.shipped as u64).sum();
            let unfilled: u64 = ledger.order_history().iter().map(|o| o.unfilled as u64).sum();

            assert_eq!(
                shipped + ledger.total_backorder_filled() + ledger.backorder(),
                demand,
                "{}",
                ledger.name
            );
            assert_eq!(unfilled, ledger.total_backorder_filled() + ledger.backorder());
        }
    }
}

#[test]
fn shipments_never_exceed_stock_before_ship() {
    for config in all_configs() {
        let initial: Vec<u64> = config.skus.iter().map(|s| s.initial_stock as u64).collect();
        let sim = finished(config);

        for (ledger, &start) in sim.ledgers().zip(&initial) {
            let mut previous_close = start;
            for (i, order) in ledger.order_history().iter().enumerate() {
                let shelved_today: u64 = ledger
                    .receipt_history()
                    .iter()
                    .filter(|r| r.day == order.day)
                    .map(|r| r.shelved as u64)
                    .sum();
                let before_ship = previous_close + shelved_today;

                assert!(order.shipped <= order.demand);
                assert_eq!(order.shipped as u64, (order.demand as u64).min(before_ship));
                assert_eq!(order.unfilled, order.demand - order.shipped);

                previous_close = ledger.stock_history()[i];
            }
        }
    }
}

#[test]
fn at_most_one_order_in_flight() {
    for config in all_configs() {
        let mut sim = InventorySimulation::new(config).unwrap();
        while !sim.is_finished() {
            sim.step();
            for ledger in sim.ledgers() {
                assert!(ledger.pipeline().len() <= 1, "{} on day {}", ledger.name, sim.current_day);
            }
        }
    }
}

#[test]
fn arrivals_follow_sampled_lead_time() {
    for config in all_configs() {
        let sim = finished(config);
        for ledger in sim.ledgers() {
            assert!(!ledger.purchase_history().is_empty());
            for purchase in ledger.purchase_history() {
                assert!(purchase.arrival_day > purchase.day);
                assert!((2..=8).contains(&purchase.lead_time()));
                assert_eq!(purchase.qty, ledger.order_qty);
            }
            // Every order placed before the horizon's end lands exactly once
            for receipt in ledger.receipt_history() {
                assert!(ledger
                    .purchase_history()
                    .iter()
                    .any(|p| p.arrival_day == receipt.day && p.qty == receipt.qty));
            }
        }
    }
}

#[test]
fn fill_rate_is_a_fraction() {
    for config in all_configs() {
        for kpi in finished(config).kpis() {
            assert!(kpi.total_demand > 0);
            assert!((0.0..=1.0).contains(&kpi.fill_rate), "{:?}", kpi);
        }
    }
}

#[test]
fn identical_seed_reproduces_run() {
    let a = finished(SimulationConfig::default());
    let b = finished(SimulationConfig::default());

    for (x, y) in a.skus.iter().zip(&b.skus) {
        assert_eq!(x.demand, y.demand);
        assert_eq!(x.ledger.purchase_history(), y.ledger.purchase_history());
        assert_eq!(x.ledger.stock_history(), y.ledger.stock_history());
    }
    assert_eq!(a.kpis(), b.kpis());
}

#[test]
fn different_seed_changes_demand() {
    let a = finished(SimulationConfig::default());
    let b = finished(SimulationConfig {
        seed: 7,
        ..SimulationConfig::default()
    });
    assert_ne!(a.skus[0].demand, b.skus[0].demand);
}

#[test]
fn sku_streams_do_not_depend_on_neighbours() {
    let full = finished(SimulationConfig::default());

    let mut config = SimulationConfig::default();
    config.skus.truncate(1);
    let alone = finished(config);

    assert_eq!(full.skus[0].demand, alone.skus[0].demand);
    assert_eq!(full.kpis()[0], alone.kpis()[0]);
}

fn fixed_lead_time_run(
    ledger: InventoryLedger,
    demand: Vec<DemandRecord>,
    lead_time: u32,
) -> SkuRun {
    SkuRun::new(
        ledger,
        demand,
        Box::new(
            ReorderPointPolicy::new(
                lead_time,
                lead_time,
                LeadTimeSampling::EveryReview,
                sku_stream(42, 0, StreamPurpose::LeadTime),
            )
            .unwrap(),
        ),
    )
}

#[test]
fn stock_below_reorder_point_triggers_order_on_day_one() {
    // ROP = 85 * 5 + 71 = 496 and stock stays at 411 with zero demand
    let ledger = InventoryLedger::new("A001", 411, 71, 595, 85.0);
    let run = fixed_lead_time_run(ledger, generate_constant_demand(10, 0), 5);
    let mut sim = InventorySimulation::from_runs(10, vec![run]).unwrap();

    sim.step();

    let ledger = sim.ledger("A001").unwrap();
    let purchase = ledger.purchase_history()[0];
    assert_eq!(purchase.day, 1);
    assert_eq!(purchase.qty, 595);
    assert_eq!(purchase.stock_at_order, 411);
    assert_eq!(purchase.arrival_day, 6);
}

#[test]
fn shortfall_then_arrival_settles_backorder_first() {
    // Day 1: 100 on hand, 120 demanded -> 20 owed, order of 50 due day 3
    let ledger = InventoryLedger::new("B001", 100, 0, 50, 10.0);
    let mut demand = generate_constant_demand(3, 0);
    demand[0].demand = 120;
    let run = fixed_lead_time_run(ledger, demand, 2);
    let mut sim = InventorySimulation::from_runs(3, vec![run]).unwrap();

    sim.step();
    {
        let ledger = sim.ledger("B001").unwrap();
        assert_eq!((ledger.stock(), ledger.backorder()), (0, 20));
    }

    sim.run();

    let ledger = sim.ledger("B001").unwrap();
    assert_eq!(ledger.backorder(), 0);
    assert_eq!(ledger.stock_history(), &[0, 0, 30]);
}

#[test]
fn zero_demand_run_reports_zero_fill_rate() {
    let mut config = SimulationConfig::default();
    for sku in &mut config.skus {
        sku.demand.baseline = 0.0;
        sku.demand.trend_rate = 0.0;
    }
    let sim = finished(config);

    for kpi in sim.kpis() {
        assert_eq!(kpi.total_demand, 0);
        assert_eq!(kpi.fill_rate, 0.0);
        assert_eq!(kpi.inventory_turnover, 0.0);
    }
}

#[test]
fn kpis_match_ledger_history() {
    let sim = finished(SimulationConfig::default());
    for ledger in sim.ledgers() {
        let kpi = KpiSummary::from_ledger(ledger);
        assert_eq!(kpi.order_count, ledger.purchase_history().len());
        assert_eq!(
            kpi.stockout_days,
            ledger.order_history().iter().filter(|o| o.unfilled > 0).count()
        );
        assert_eq!(kpi.total_demand, kpi.total_shipped + kpi.total_backorder);
    }
}

#[test]
fn huge_demand_runs_to_completion_and_balances() {
    // Cumulative backorder here passes u32::MAX within a few hundred days
    let mut config = SimulationConfig::default();
    config.skus.truncate(1);
    let sku = &mut config.skus[0];
    sku.initial_stock = 0;
    sku.order_qty = 1;
    sku.demand.baseline = 20_000_000.0;
    assert_eq!(config.validate(), Ok(()));

    let sim = finished(config);

    let ledger = &sim.skus[0].ledger;
    let demand: u64 = ledger.order_history().iter().map(|o| o.demand as u64).sum();
    let shipped: u64 = ledger.order_history().iter().map(|o| o.shipped as u64).sum();
    assert!(ledger.backorder() > u32::MAX as u64);
    assert_eq!(
        shipped + ledger.total_backorder_filled() + ledger.backorder(),
        demand
    );
    assert_eq!(sim.kpis()[0].total_demand, demand);
}
