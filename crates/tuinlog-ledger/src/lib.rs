//! # Tuinlog Ledger
//!
//! The stateful aggregate for Tuinlog: one [`Ledger`] owns the stored
//! records and guards every mutation, while totals and statuses are
//! derived on read by `tuinlog-billing`. Nothing derived is ever
//! stored, so the books cannot drift out of sync with the raw records.
//!
//! ## Architecture
//!
//! ```text
//! host snapshot (JSON) <─> Ledger ─┬─> work log ops (timer, items, segments)
//!                                  ├─> settlement ops (links, lines, lifecycle)
//!                                  ├─> catalog ops (customers, products)
//!                                  └─> queries ──> tuinlog-billing derivations
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut ledger = demo::starter_ledger();
//! let customer_id = ledger.customers()[0].id.clone();
//!
//! let log_id = ledger.start_log(&customer_id, Timestamp::now())?;
//! ledger.toggle_break(Timestamp::now())?;
//! ledger.toggle_break(Timestamp::now())?;
//! ledger.stop_log(Timestamp::now())?;
//!
//! let settlement_id = ledger.create_settlement_for_log(&log_id, today, Timestamp::now())?;
//! ledger.mark_calculated(&settlement_id)?;
//! let state = ledger.payment_state(&settlement_id).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod demo;

mod catalog;
mod ledger;
mod settlements;
mod worklog;

// Re-exports
pub use ledger::Ledger;
pub use settlements::LineDraft;
pub use tuinlog_billing::{LogbookSummary, PaymentState};

/// Commonly used ledger types and the records behind them.
pub mod prelude {
    pub use crate::demo;
    pub use crate::{Ledger, LineDraft, LogbookSummary, PaymentState};
    pub use tuinlog_core::{
        Bucket, Customer, LedgerError, LedgerResult, LedgerSettings, Log, LogStatus, Product,
        Settlement, SettlementLine, SettlementStatus, Timestamp,
    };
}
