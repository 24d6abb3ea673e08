//! Line arithmetic and per-bucket settlement totals.
//!
//! Settlement lines carry quantity, unit price and tax rate; amounts and
//! tax are derived. Totals are computed per bucket because the two buckets
//! settle differently: invoice lines accrue tax at each line's rate while
//! cash lines are tax exempt by definition.
//!
//! Rounding is deliberate and asymmetric. Bucket totals round every line
//! amount before summing and round the sums again, matching how the
//! amounts appear on a printed settlement. Log item costs instead round
//! once on the raw sum, so the two paths can legitimately disagree by a
//! cent and must not be unified.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use tuinlog_core::{round2, Bucket, Log, SettlementLine};

/// Subtotal, tax and grand total for one bucket of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTotals {
    /// Sum of rounded line amounts, rounded again
    pub subtotal: Decimal,
    /// Sum of rounded per-line tax, rounded again; always zero for cash
    pub tax: Decimal,
    /// Subtotal plus tax, rounded
    pub total: Decimal,
}

impl BucketTotals {
    /// Derives totals over the lines assigned to `bucket`.
    ///
    /// Lines in other buckets are ignored entirely. `default_tax_rate`
    /// applies to invoice lines that carry no rate of their own.
    #[must_use]
    pub fn from_lines(
        lines: &[SettlementLine],
        bucket: Bucket,
        default_tax_rate: Decimal,
    ) -> Self {
        let mut subtotal = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        for line in lines.iter().filter(|line| line.bucket == bucket) {
            subtotal += line.amount();
            tax += line.tax_amount(default_tax_rate);
        }
        let subtotal = round2(subtotal);
        let tax = round2(tax);
        Self {
            subtotal,
            tax,
            total: round2(subtotal + tax),
        }
    }
}

/// Derives subtotal, tax and total over the lines assigned to `bucket`.
#[must_use]
pub fn bucket_totals(
    lines: &[SettlementLine],
    bucket: Bucket,
    default_tax_rate: Decimal,
) -> BucketTotals {
    BucketTotals::from_lines(lines, bucket, default_tax_rate)
}

/// Rounded amount of a single line: quantity times unit price.
#[must_use]
pub fn line_amount(line: &SettlementLine) -> Decimal {
    line.amount()
}

/// Rounded tax of a single line; zero for cash lines.
#[must_use]
pub fn line_tax(line: &SettlementLine, default_tax_rate: Decimal) -> Decimal {
    line.tax_amount(default_tax_rate)
}

/// Total cost of a log's loose items, rounded once on the raw sum.
///
/// Items with no quantity count as zero. Unlike [`bucket_totals`] the
/// per-item products are summed unrounded.
#[must_use]
pub fn items_amount(log: &Log) -> Decimal {
    let raw = log
        .items
        .iter()
        .map(|item| item.quantity.unwrap_or(Decimal::ZERO) * item.unit_price)
        .sum();
    round2(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tuinlog_core::{Log, LogItem, Timestamp};

    #[test]
    fn test_invoice_totals_accumulate_line_tax() {
        let lines = vec![
            SettlementLine::new("Arbeid", dec!(4), dec!(38)).with_tax_rate(dec!(0.21)),
            SettlementLine::new("Parkeren", dec!(2), dec!(2.5)).with_tax_rate(dec!(0.21)),
        ];

        let totals = bucket_totals(&lines, Bucket::Invoice, dec!(0.21));
        // 152.00 + 5.00 = 157.00; tax 31.92 + 1.05 = 32.97
        assert_eq!(totals.subtotal, dec!(157.00));
        assert_eq!(totals.tax, dec!(32.97));
        assert_eq!(totals.total, dec!(189.97));
    }

    #[test]
    fn test_cash_totals_carry_no_tax() {
        let lines = vec![
            SettlementLine::new("Groenafval", dec!(1), dec!(38))
                .with_tax_rate(dec!(0.21))
                .with_bucket(Bucket::Cash),
        ];

        let totals = bucket_totals(&lines, Bucket::Cash, dec!(0.21));
        assert_eq!(totals.subtotal, dec!(38.00));
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, dec!(38.00));
    }

    #[test]
    fn test_other_bucket_lines_are_ignored() {
        let lines = vec![
            SettlementLine::new("Arbeid", dec!(4), dec!(38)),
            SettlementLine::new("Groenafval", dec!(1), dec!(38)).with_bucket(Bucket::Cash),
        ];

        let invoice = bucket_totals(&lines, Bucket::Invoice, dec!(0.21));
        let cash = bucket_totals(&lines, Bucket::Cash, dec!(0.21));
        assert_eq!(invoice.subtotal, dec!(152.00));
        assert_eq!(cash.subtotal, dec!(38.00));
    }

    #[test]
    fn test_default_rate_fills_missing_line_rate() {
        let lines = vec![SettlementLine::new("Regel", dec!(1), dec!(100))];

        let totals = bucket_totals(&lines, Bucket::Invoice, dec!(0.09));
        assert_eq!(totals.tax, dec!(9.00));
    }

    #[test]
    fn test_no_lines_is_all_zero() {
        let totals = bucket_totals(&[], Bucket::Invoice, dec!(0.21));
        assert_eq!(totals, BucketTotals::default());
    }

    #[test]
    fn test_items_amount_rounds_once_at_the_end() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut log = Log::new("cust-1", date, Timestamp::from_millis(0));
        log.items = vec![
            LogItem::new("p-1", dec!(1.5), dec!(2.21)),
            LogItem::new("p-2", dec!(1.5), dec!(2.21)),
        ];

        // Raw: 3.315 + 3.315 = 6.63, rounded once.
        // Per-item rounding would give 3.32 + 3.32 = 6.64 instead.
        assert_eq!(items_amount(&log), dec!(6.63));
    }

    #[test]
    fn test_items_without_quantity_count_as_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut log = Log::new("cust-1", date, Timestamp::from_millis(0));
        let mut blank = LogItem::new("p-1", dec!(1), dec!(40));
        blank.quantity = None;
        log.items = vec![blank, LogItem::new("p-2", dec!(2), dec!(2.5))];

        assert_eq!(items_amount(&log), dec!(5.00));
    }
}
