pub mod ledger;
pub mod pipeline;
pub mod records;
