// src/model/pipeline.rs

use std::collections::VecDeque;

use crate::model::records::PendingArrival;

/// Replenishment orders in transit, kept in the order they were placed.
#[derive(Debug, Clone, Default)]
pub struct ArrivalPipeline {
    buffer: VecDeque<PendingArrival>,
}

impl ArrivalPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// An order leaves the supplier and enters the pipe.
    pub fn push_departure(&mut self, arrival: PendingArrival) {
        self.buffer.push_back(arrival);
    }

    /// Removes and returns every entry landing on `day`.
    /// Entries due on other days stay put, in their original order.
    pub fn take_arrivals(&mut self, day: u32) -> Vec<PendingArrival> {
        let mut arrived = Vec::new();
        self.buffer.retain(|entry| {
            if entry.arrival_day == day {
                arrived.push(*entry);
                false
            } else {
                true
            }
        });
        arrived
    }

    /// Total quantity still in transit.
    pub fn in_transit(&self) -> u32 {
        self.buffer.iter().map(|entry| entry.qty).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingArrival> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
