//! Per-bucket totals rollup and the paid predicate.
//!
//! A settlement is paid when every bucket that actually bills something
//! has been collected. The two buckets are weighed asymmetrically: the
//! invoice side counts gross (tax included), the cash side counts the
//! net subtotal, which for tax-exempt cash lines is also the amount
//! that changes hands.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use tuinlog_core::{round2, Bucket, Settlement};

use crate::totals::{bucket_totals, BucketTotals};

/// The settlement's derived payment position across both buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    /// Totals over the invoice lines
    pub invoice: BucketTotals,
    /// Totals over the cash lines
    pub cash: BucketTotals,
    /// Gross amount billed through the invoice bucket
    pub invoice_total: Decimal,
    /// Net amount collected in cash
    pub cash_total: Decimal,
    /// Whether the invoice bucket bills anything
    pub has_invoice: bool,
    /// Whether the cash bucket bills anything
    pub has_cash: bool,
    /// Whether every non-empty bucket has been collected; an empty
    /// settlement is never paid
    pub is_paid: bool,
}

impl PaymentState {
    /// Derives the payment position of a settlement.
    #[must_use]
    pub fn from_settlement(settlement: &Settlement, default_tax_rate: Decimal) -> Self {
        let invoice = bucket_totals(&settlement.lines, Bucket::Invoice, default_tax_rate);
        let cash = bucket_totals(&settlement.lines, Bucket::Cash, default_tax_rate);
        let invoice_total = invoice.total;
        let cash_total = cash.subtotal;
        let has_invoice = invoice_total > Decimal::ZERO;
        let has_cash = cash_total > Decimal::ZERO;
        let is_paid = (!has_invoice || settlement.invoice_paid)
            && (!has_cash || settlement.cash_paid)
            && (has_invoice || has_cash);
        Self {
            invoice,
            cash,
            invoice_total,
            cash_total,
            has_invoice,
            has_cash,
            is_paid,
        }
    }

    /// Everything owed across both buckets, rounded.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        round2(self.invoice_total + self.cash_total)
    }
}

/// Derives the payment position of a settlement.
#[must_use]
pub fn payment_state(settlement: &Settlement, default_tax_rate: Decimal) -> PaymentState {
    PaymentState::from_settlement(settlement, default_tax_rate)
}

/// Whether every non-empty bucket of the settlement has been collected.
#[must_use]
pub fn is_settlement_paid(settlement: &Settlement, default_tax_rate: Decimal) -> bool {
    payment_state(settlement, default_tax_rate).is_paid
}
