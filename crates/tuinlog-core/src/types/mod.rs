//! Domain types for the settlement engine.
//!
//! This module provides typed representations of the ledger's records:
//!
//! - [`Timestamp`]: Instant in epoch milliseconds
//! - [`Bucket`]: Payment channel (invoice or cash)
//! - [`Log`], [`Segment`], [`LogItem`]: A timed work visit and its materials
//! - [`Product`], [`Customer`]: Catalog records
//! - [`Settlement`], [`SettlementLine`]: The billing side
//! - [`SettlementStatus`], [`LogStatus`]: Stored and derived lifecycle states

mod bucket;
mod customer;
mod log;
mod money;
mod product;
mod settlement;
mod status;
mod time;

pub use bucket::Bucket;
pub use customer::Customer;
pub use log::{Log, LogItem, Segment, SegmentKind};
pub use money::{billable_hours, round2, MS_PER_HOUR};
pub use product::Product;
pub use settlement::{Settlement, SettlementLine};
pub use status::{LogStatus, SettlementStatus};
pub use time::Timestamp;
