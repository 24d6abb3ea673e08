//! The stored aggregate and its read-side queries.
//!
//! [`Ledger`] owns every record the engine persists. Mutations live in
//! the sibling modules (`worklog`, `settlements`, `catalog`); this
//! module holds the lookups, the derived views, snapshot I/O, and the
//! stored-state integrity check.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tuinlog_billing::{LogbookSummary, PaymentState};
use tuinlog_core::{
    Customer, LedgerError, LedgerResult, LedgerSettings, Log, LogStatus, Product, Settlement,
    Timestamp,
};

/// The complete stored state of one installation.
///
/// Everything the engine persists lives here; totals, statuses, and
/// summaries are derived on read. Collections default to empty so
/// snapshots written by earlier iterations still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    pub(crate) settings: LedgerSettings,
    pub(crate) customers: Vec<Customer>,
    pub(crate) products: Vec<Product>,
    pub(crate) logs: Vec<Log>,
    pub(crate) settlements: Vec<Settlement>,
    pub(crate) active_log_id: Option<String>,
}

impl Ledger {
    /// Creates an empty ledger with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Record access ===

    /// Billing settings shared by every derivation.
    #[must_use]
    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Replaces the billing settings.
    pub fn update_settings(&mut self, settings: LedgerSettings) {
        self.settings = settings;
        debug!(
            hourly_rate = %self.settings.hourly_rate,
            default_tax_rate = %self.settings.default_tax_rate,
            "Settings updated"
        );
    }

    /// Customer roster, in insertion order.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Product catalog, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Work logs, newest first.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Settlements, newest first.
    #[must_use]
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Looks up a customer by id.
    #[must_use]
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Looks up a work log by id.
    #[must_use]
    pub fn log(&self, log_id: &str) -> Option<&Log> {
        self.logs.iter().find(|l| l.id == log_id)
    }

    /// Looks up a settlement by id.
    #[must_use]
    pub fn settlement(&self, settlement_id: &str) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id == settlement_id)
    }

    /// Id of the running work log, if any.
    #[must_use]
    pub fn active_log_id(&self) -> Option<&str> {
        self.active_log_id.as_deref()
    }

    /// The running work log, if the active pointer resolves.
    #[must_use]
    pub fn active_log(&self) -> Option<&Log> {
        self.active_log_id.as_deref().and_then(|id| self.log(id))
    }

    // === Derived views ===

    /// The settlement that lists `log_id`, if any. A log belongs to at
    /// most one settlement; the first match wins on corrupted input.
    #[must_use]
    pub fn settlement_for_log(&self, log_id: &str) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.links_log(log_id))
    }

    /// Projects the billing status of a work log. Unknown ids read as
    /// [`LogStatus::Free`].
    #[must_use]
    pub fn log_status(&self, log_id: &str) -> LogStatus {
        tuinlog_billing::log_status(
            self.settlement_for_log(log_id),
            self.settings.default_tax_rate,
        )
    }

    /// Derives a settlement's per-bucket totals and paid state.
    #[must_use]
    pub fn payment_state(&self, settlement_id: &str) -> Option<PaymentState> {
        self.settlement(settlement_id)
            .map(|s| tuinlog_billing::payment_state(s, self.settings.default_tax_rate))
    }

    /// Summarizes the logs a settlement links, measured against `now`
    /// for any still-running segment.
    #[must_use]
    pub fn logbook_summary(&self, settlement_id: &str, now: Timestamp) -> Option<LogbookSummary> {
        self.settlement(settlement_id).map(|s| {
            tuinlog_billing::logbook_summary(s, &self.logs, self.settings.hourly_rate, now)
        })
    }

    // === Snapshot I/O ===

    /// Loads a ledger from a host snapshot.
    ///
    /// Accepts the original host format: camelCase keys, lowercase enum
    /// tags, integer timestamps. Fields added across snapshot
    /// iterations default, so older snapshots load.
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        let ledger: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::invalid_ledger(format!("snapshot parse failed: {e}")))?;
        info!(
            logs = ledger.logs.len(),
            settlements = ledger.settlements.len(),
            "Snapshot loaded"
        );
        Ok(ledger)
    }

    /// Serializes the ledger back to the host snapshot format.
    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string(self)
            .map_err(|e| LedgerError::invalid_ledger(format!("snapshot serialize failed: {e}")))
    }

    // === Integrity ===

    /// Checks the stored-state invariants.
    ///
    /// Mutations uphold these; foreign snapshots may not. Verified: the
    /// active pointer resolves to an open log and only the active log
    /// is running, each log has at most one open segment, no settlement
    /// lists a log twice, and no log is claimed by two settlements.
    pub fn validate(&self) -> LedgerResult<()> {
        if let Some(active_id) = &self.active_log_id {
            match self.log(active_id) {
                None => {
                    return Err(LedgerError::invalid_ledger(format!(
                        "active pointer {active_id} matches no log"
                    )));
                }
                Some(log) if log.is_closed() => {
                    return Err(LedgerError::invalid_ledger(format!(
                        "active log {active_id} is already closed"
                    )));
                }
                Some(_) => {}
            }
        }

        for log in &self.logs {
            let open = log.segments.iter().filter(|s| s.is_open()).count();
            if open > 1 {
                return Err(LedgerError::invalid_ledger(format!(
                    "log {} has {open} open segments",
                    log.id
                )));
            }
            if open == 1 && self.active_log_id.as_deref() != Some(log.id.as_str()) {
                return Err(LedgerError::invalid_ledger(format!(
                    "log {} is running but not active",
                    log.id
                )));
            }
        }

        for settlement in &self.settlements {
            let mut seen = HashSet::new();
            for log_id in &settlement.log_ids {
                if !seen.insert(log_id.as_str()) {
                    return Err(LedgerError::invalid_ledger(format!(
                        "settlement {} lists log {log_id} twice",
                        settlement.id
                    )));
                }
            }
        }

        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for settlement in &self.settlements {
            for log_id in &settlement.log_ids {
                if let Some(other) = claimed.insert(log_id.as_str(), settlement.id.as_str()) {
                    return Err(LedgerError::invalid_ledger(format!(
                        "log {log_id} is claimed by settlements {other} and {}",
                        settlement.id
                    )));
                }
            }
        }

        Ok(())
    }

    // === Internal lookup helpers ===

    pub(crate) fn log_position(&self, log_id: &str) -> LedgerResult<usize> {
        self.logs
            .iter()
            .position(|l| l.id == log_id)
            .ok_or_else(|| LedgerError::unknown_log(log_id))
    }

    pub(crate) fn log_mut(&mut self, log_id: &str) -> LedgerResult<&mut Log> {
        self.logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .ok_or_else(|| LedgerError::unknown_log(log_id))
    }

    pub(crate) fn active_log_mut(&mut self) -> LedgerResult<&mut Log> {
        let active_id = self.active_log_id.clone().ok_or(LedgerError::NoActiveLog)?;
        self.logs
            .iter_mut()
            .find(|l| l.id == active_id)
            .ok_or(LedgerError::NoActiveLog)
    }

    pub(crate) fn settlement_position(&self, settlement_id: &str) -> LedgerResult<usize> {
        self.settlements
            .iter()
            .position(|s| s.id == settlement_id)
            .ok_or_else(|| LedgerError::unknown_settlement(settlement_id))
    }

    pub(crate) fn settlement_mut(&mut self, settlement_id: &str) -> LedgerResult<&mut Settlement> {
        self.settlements
            .iter_mut()
            .find(|s| s.id == settlement_id)
            .ok_or_else(|| LedgerError::unknown_settlement(settlement_id))
    }
}
