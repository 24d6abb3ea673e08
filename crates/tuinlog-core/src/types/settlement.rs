//! Settlement records: the billing side of the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{round2, Bucket, SettlementStatus, Timestamp};

/// A single billable line on a settlement.
///
/// Lines are either composed from linked work logs or added by hand.
/// Both carry a price snapshot; later catalog edits never reach back
/// into existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLine {
    /// Unique identifier.
    pub id: String,

    /// Catalog product behind the line; `None` for free-text lines and
    /// for lines whose product was deleted.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Description shown on the settlement.
    #[serde(default)]
    pub description: String,

    /// Unit label (e.g. "uur", "keer").
    #[serde(default)]
    pub unit: String,

    /// Billed quantity.
    #[serde(rename = "qty", default)]
    pub quantity: Decimal,

    /// Price per unit.
    #[serde(default)]
    pub unit_price: Decimal,

    /// Tax fraction for this line; `None` falls back to the ledger
    /// default. Stored but never applied on cash lines.
    #[serde(rename = "vatRate", default)]
    pub tax_rate: Option<Decimal>,

    /// Payment channel the line settles through.
    #[serde(default)]
    pub bucket: Bucket,
}

impl SettlementLine {
    /// Creates a line with a fresh id.
    #[must_use]
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id: None,
            description: description.into(),
            unit: String::new(),
            quantity,
            unit_price,
            tax_rate: None,
            bucket: Bucket::default(),
        }
    }

    /// Sets the catalog product reference.
    #[must_use]
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Sets the unit label.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the line's own tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Sets the payment bucket.
    #[must_use]
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    /// The rounded line amount: quantity times unit price.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        round2(self.quantity * self.unit_price)
    }

    /// The rounded tax the line contributes.
    ///
    /// Cash lines contribute nothing regardless of the rate they carry;
    /// invoice lines without an own rate fall back to `default_tax_rate`.
    #[must_use]
    pub fn tax_amount(&self, default_tax_rate: Decimal) -> Decimal {
        if self.bucket.is_cash() {
            return Decimal::ZERO;
        }
        round2(self.amount() * self.tax_rate.unwrap_or(default_tax_rate))
    }

    /// Identity key used when reconciling recomposed lines against
    /// operator-edited ones.
    #[must_use]
    pub fn merge_key(&self) -> (Option<&str>, &str) {
        (self.product_id.as_deref(), &self.description)
    }
}

/// A settlement: one customer's bundle of work logs priced into lines.
///
/// `log_ids` is an ordered, duplicate-free list. The ledger enforces
/// that no log appears in more than one settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Unique identifier.
    pub id: String,

    /// Customer being settled with. Single-customer by definition.
    pub customer_id: String,

    /// Settlement date.
    pub date: NaiveDate,

    /// Creation instant.
    #[serde(default)]
    pub created_at: Timestamp,

    /// Linked work log ids, in link order.
    #[serde(default)]
    pub log_ids: Vec<String>,

    /// Billable lines.
    #[serde(default)]
    pub lines: Vec<SettlementLine>,

    /// Stored lifecycle state.
    #[serde(default)]
    pub status: SettlementStatus,

    /// Whether the invoice bucket has been collected.
    #[serde(default)]
    pub invoice_paid: bool,

    /// Whether the cash bucket has been collected.
    #[serde(default)]
    pub cash_paid: bool,

    /// Marks records created by the demo seeder.
    #[serde(default)]
    pub demo: bool,
}

impl Settlement {
    /// Creates an empty draft settlement with a fresh id.
    #[must_use]
    pub fn new(customer_id: impl Into<String>, date: NaiveDate, created_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            date,
            created_at,
            log_ids: Vec::new(),
            lines: Vec::new(),
            status: SettlementStatus::Draft,
            invoice_paid: false,
            cash_paid: false,
            demo: false,
        }
    }

    /// True while the settlement is editable.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status == SettlementStatus::Draft
    }

    /// True when the settlement lists the given log.
    #[must_use]
    pub fn links_log(&self, log_id: &str) -> bool {
        self.log_ids.iter().any(|id| id == log_id)
    }

    /// Appends a log id, keeping the list duplicate-free.
    pub fn link(&mut self, log_id: impl Into<String>) {
        let log_id = log_id.into();
        if !self.links_log(&log_id) {
            self.log_ids.push(log_id);
        }
    }

    /// Removes a log id if present.
    pub fn unlink(&mut self, log_id: &str) {
        self.log_ids.retain(|id| id != log_id);
    }
}
