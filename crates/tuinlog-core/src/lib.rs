//! # Tuinlog Core
//!
//! Core types and primitives for the Tuinlog settlement reconciliation engine.
//!
//! This crate provides the foundational building blocks used throughout Tuinlog:
//!
//! - **Records**: Domain records like `Log`, `Settlement`, `Product`, `Customer`
//! - **Money**: Cent-precision rounding over `rust_decimal`
//! - **Time**: Epoch-millisecond `Timestamp` instants for segment timekeeping
//! - **Errors**: The guard taxonomy every ledger mutation reports through
//!
//! All records serialize in the host snapshot format (camelCase keys, lowercase
//! enum tags, millisecond instants), so ledgers written by earlier snapshot
//! iterations load unchanged.
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Enums and newtypes where stringly-typed data would drift
//! - **Tolerant Data**: Dangling references are representable, never a panic
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use tuinlog_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! // Cent rounding is half-away-from-zero on both sides of zero
//! assert_eq!(round2(dec!(2.675)), dec!(2.68));
//! assert_eq!(round2(dec!(-2.675)), dec!(-2.68));
//!
//! // 4h of work converts to billable hours at cent precision
//! assert_eq!(billable_hours(14_400_000), dec!(4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::if_not_else)]
#![allow(clippy::match_same_arms)]

pub mod config;
pub mod error;
pub mod types;

#[cfg(test)]
mod snapshot_tests;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::LedgerSettings;
    pub use crate::error::{LedgerError, LedgerResult};
    pub use crate::types::{
        billable_hours, round2, Bucket, Customer, Log, LogItem, LogStatus, Product, Segment,
        SegmentKind, Settlement, SettlementLine, SettlementStatus, Timestamp,
    };
}

// Re-export commonly used types at crate root
pub use config::{LedgerSettings, DEFAULT_HOURLY_RATE, DEFAULT_TAX_RATE};
pub use error::{LedgerError, LedgerResult};
pub use types::{
    billable_hours, round2, Bucket, Customer, Log, LogItem, LogStatus, Product, Segment,
    SegmentKind, Settlement, SettlementLine, SettlementStatus, Timestamp, MS_PER_HOUR,
};
