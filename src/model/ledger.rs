// src/model/ledger.rs

use tracing::{debug, trace};

use crate::model::pipeline::ArrivalPipeline;
use crate::model::records::{OrderRecord, PendingArrival, PurchaseRecord, ReceiptRecord};
use crate::simulation::config::SkuConfig;

/// Stock, backorder and in-transit bookkeeping for a single SKU.
///
/// Each simulated day moves through the ledger in a fixed order:
/// [`receive`](Self::receive), [`ship`](Self::ship), then optionally
/// [`place_order`](Self::place_order) when the replenishment policy fires,
/// and finally [`record_stock`](Self::record_stock).
///
/// Histories are append-only. Nothing ever rewrites a past entry.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    // Identity and policy parameters
    pub name: String,
    pub safety_stock: u32,
    pub order_qty: u32,
    pub avg_daily_demand: f64,

    // State Variables
    // Running totals are u64: cumulative backorder over a long horizon
    // can exceed any single day's u32 demand many times over.
    stock: u64,
    backorder: u64, // Demand owed to customers, settled from arrivals first
    pipeline: ArrivalPipeline,

    // History
    stock_history: Vec<u64>,
    order_history: Vec<OrderRecord>,
    purchase_history: Vec<PurchaseRecord>,
    receipt_history: Vec<ReceiptRecord>,
}

impl InventoryLedger {
    pub fn new(
        name: impl Into<String>,
        initial_stock: u32,
        safety_stock: u32,
        order_qty: u32,
        avg_daily_demand: f64,
    ) -> Self {
        Self {
            name: name.into(),
            safety_stock,
            order_qty,
            avg_daily_demand,
            stock: initial_stock as u64,
            backorder: 0,
            pipeline: ArrivalPipeline::new(),
            stock_history: Vec::new(),
            order_history: Vec::new(),
            purchase_history: Vec::new(),
            receipt_history: Vec::new(),
        }
    }

    pub fn from_config(config: &SkuConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.initial_stock,
            config.safety_stock,
            config.order_qty,
            config.avg_daily_demand,
        )
    }

    /// Step 1: Take delivery of everything due today.
    ///
    /// Arrivals settle outstanding backorder before anything reaches the
    /// shelf. Returns the quantity that went onto the shelf.
    pub fn receive(&mut self, day: u32) -> u64 {
        let mut shelved = 0;

        for arrival in self.pipeline.take_arrivals(day) {
            // Bounded by arrival.qty, so it fits back into u32
            let to_backorder = (arrival.qty as u64).min(self.backorder) as u32;
            self.backorder -= to_backorder as u64;

            let remainder = arrival.qty - to_backorder;
            self.stock += remainder as u64;
            shelved += remainder as u64;

            self.receipt_history.push(ReceiptRecord {
                day,
                qty: arrival.qty,
                backorder_filled: to_backorder,
                shelved: remainder,
            });

            debug!(
                sku = %self.name,
                day,
                qty = arrival.qty,
                backorder_filled = to_backorder,
                shelved = remainder,
                "replenishment received"
            );
        }

        shelved
    }

    /// Step 2: Ship against today's demand.
    ///
    /// Ships at most what is on hand. Whatever is short becomes backorder.
    /// Returns the quantity shipped.
    pub fn ship(&mut self, day: u32, demand: u32) -> u32 {
        // Bounded by demand, so it fits back into u32
        let shipped = self.stock.min(demand as u64) as u32;
        let unfilled = demand - shipped;

        self.stock -= shipped as u64;
        self.backorder += unfilled as u64;

        self.order_history.push(OrderRecord {
            day,
            demand,
            shipped,
            unfilled,
        });

        if unfilled > 0 {
            trace!(sku = %self.name, day, demand, shipped, unfilled, "stockout");
        }

        shipped
    }

    /// Step 3: Send a fixed-quantity order to the supplier.
    ///
    /// `lead_time` must be at least one day. Returns the arrival day.
    pub fn place_order(&mut self, day: u32, lead_time: u32) -> u32 {
        debug_assert!(lead_time > 0, "lead time must be at least one day");
        let arrival_day = day + lead_time;

        self.purchase_history.push(PurchaseRecord {
            day,
            qty: self.order_qty,
            stock_at_order: self.stock,
            arrival_day,
        });
        self.pipeline.push_departure(PendingArrival {
            arrival_day,
            qty: self.order_qty,
        });

        debug!(
            sku = %self.name,
            day,
            qty = self.order_qty,
            stock = self.stock,
            arrival_day,
            "replenishment order placed"
        );

        arrival_day
    }

    /// True while any placed order has not yet arrived.
    pub fn has_open_order(&self) -> bool {
        !self.pipeline.is_empty()
    }

    /// Step 4: Close the day by snapshotting on-hand stock.
    pub fn record_stock(&mut self) {
        self.stock_history.push(self.stock);
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn backorder(&self) -> u64 {
        self.backorder
    }

    pub fn pipeline(&self) -> &ArrivalPipeline {
        &self.pipeline
    }

    pub fn stock_history(&self) -> &[u64] {
        &self.stock_history
    }

    pub fn order_history(&self) -> &[OrderRecord] {
        &self.order_history
    }

    pub fn purchase_history(&self) -> &[PurchaseRecord] {
        &self.purchase_history
    }

    pub fn receipt_history(&self) -> &[ReceiptRecord] {
        &self.receipt_history
    }

    /// Units of backorder settled by arrivals so far. These never show up
    /// as `shipped` in the order history, so the run-wide balance is
    /// `sum(shipped) + backorder_filled + backorder == sum(demand)`.
    pub fn total_backorder_filled(&self) -> u64 {
        self.receipt_history
            .iter()
            .map(|r| r.backorder_filled as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(stock: u32) -> InventoryLedger {
        InventoryLedger::new("T001", stock, 10, 50, 20.0)
    }

    #[test]
    fn ship_short_creates_backorder() {
        let mut sku = ledger(100);

        let shipped = sku.ship(1, 120);

        assert_eq!(shipped, 100);
        assert_eq!(sku.stock(), 0);
        assert_eq!(sku.backorder(), 20);
        assert_eq!(
            sku.order_history(),
            &[OrderRecord {
                day: 1,
                demand: 120,
                shipped: 100,
                unfilled: 20
            }]
        );
    }

    #[test]
    fn ship_with_enough_stock_leaves_no_backorder() {
        let mut sku = ledger(100);

        assert_eq!(sku.ship(1, 30), 30);
        assert_eq!(sku.stock(), 70);
        assert_eq!(sku.backorder(), 0);
    }

    #[test]
    fn arrival_settles_backorder_before_shelf() {
        let mut sku = ledger(100);
        sku.ship(1, 120);
        sku.place_order(1, 2);

        let shelved = sku.receive(3);

        assert_eq!(shelved, 30);
        assert_eq!(sku.backorder(), 0);
        assert_eq!(sku.stock(), 30);
        assert!(!sku.has_open_order());
        assert_eq!(
            sku.receipt_history(),
            &[ReceiptRecord {
                day: 3,
                qty: 50,
                backorder_filled: 20,
                shelved: 30
            }]
        );
        assert_eq!(sku.total_backorder_filled(), 20);
    }

    #[test]
    fn arrival_smaller_than_backorder_goes_entirely_to_backorder() {
        let mut sku = ledger(0);
        sku.ship(1, 80);
        sku.place_order(1, 3);

        assert_eq!(sku.receive(4), 0);
        assert_eq!(sku.backorder(), 30);
        assert_eq!(sku.stock(), 0);
    }

    #[test]
    fn receive_ignores_orders_due_later() {
        let mut sku = ledger(10);
        sku.place_order(1, 5);

        assert_eq!(sku.receive(3), 0);
        assert!(sku.has_open_order());
        assert_eq!(sku.stock(), 10);
    }

    #[test]
    fn same_day_arrivals_are_order_independent() {
        let mut a = ledger(0);
        a.ship(1, 70);
        a.place_order(1, 2);
        a.order_qty = 30;
        a.place_order(1, 2);

        let mut b = ledger(0);
        b.ship(1, 70);
        b.order_qty = 30;
        b.place_order(1, 2);
        b.order_qty = 50;
        b.place_order(1, 2);

        a.receive(3);
        b.receive(3);

        assert_eq!((a.stock(), a.backorder()), (10, 0));
        assert_eq!((b.stock(), b.backorder()), (10, 0));
    }

    #[test]
    fn place_order_records_stock_and_arrival() {
        let mut sku = ledger(42);

        let arrival_day = sku.place_order(7, 4);

        assert_eq!(arrival_day, 11);
        assert_eq!(
            sku.purchase_history(),
            &[PurchaseRecord {
                day: 7,
                qty: 50,
                stock_at_order: 42,
                arrival_day: 11
            }]
        );
        assert_eq!(sku.purchase_history()[0].lead_time(), 4);
        assert_eq!(sku.pipeline().in_transit(), 50);
    }

    #[test]
    fn record_stock_appends_snapshot() {
        let mut sku = ledger(15);
        sku.record_stock();
        sku.ship(1, 5);
        sku.record_stock();

        assert_eq!(sku.stock_history(), &[15, 10]);
    }

    #[test]
    fn backorder_accumulates_past_a_single_day_range() {
        let mut sku = ledger(0);
        for day in 1..=3 {
            sku.ship(day, u32::MAX);
        }

        assert_eq!(sku.backorder(), 3 * u32::MAX as u64);
        assert_eq!(sku.stock(), 0);

        sku.place_order(3, 1);
        assert_eq!(sku.receive(4), 0);
        assert_eq!(sku.backorder(), 3 * u32::MAX as u64 - 50);
    }

    #[test]
    fn stock_grows_past_a_single_day_range() {
        let mut sku = InventoryLedger::new("T002", u32::MAX, 0, u32::MAX, 0.0);
        sku.place_order(1, 1);
        sku.receive(2);

        assert_eq!(sku.stock(), 2 * u32::MAX as u64);
        assert_eq!(sku.ship(2, 7), 7);
        assert_eq!(sku.stock(), 2 * u32::MAX as u64 - 7);
    }
}
