//! Work log status projection.
//!
//! A log's status is never stored. It is read off the settlement that
//! links the log, if any, so linking, calculating and collecting a
//! settlement move every linked log along without touching it.

use rust_decimal::Decimal;

use tuinlog_core::{LogStatus, Settlement, SettlementStatus};

use crate::payment::is_settlement_paid;

/// Projects a log's status from the settlement that links it.
///
/// `owner` is the settlement whose `log_ids` contains the log, `None`
/// when no settlement does. Precedence: paid over calculated over
/// linked; a log outside any settlement is free.
#[must_use]
pub fn log_status(owner: Option<&Settlement>, default_tax_rate: Decimal) -> LogStatus {
    let Some(settlement) = owner else {
        return LogStatus::Free;
    };
    if is_settlement_paid(settlement, default_tax_rate) {
        return LogStatus::Paid;
    }
    if settlement.status == SettlementStatus::Calculated {
        return LogStatus::Calculated;
    }
    LogStatus::Linked
}
