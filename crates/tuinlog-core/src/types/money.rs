//! Monetary rounding and billable hour conversion.

use rust_decimal::{Decimal, RoundingStrategy};

/// Milliseconds per billable hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Rounds a monetary amount to whole cents, halves away from zero.
///
/// Every derived amount passes through this at each derivation step
/// (line amount, line tax, bucket aggregates), so downstream sums
/// always operate on already-rounded cents.
///
/// # Example
///
/// ```rust
/// use tuinlog_core::types::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(1.005)), dec!(1.01));
/// assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
/// ```
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts worked milliseconds into billable hours at cent precision.
#[must_use]
pub fn billable_hours(work_ms: i64) -> Decimal {
    round2(Decimal::from(work_ms) / Decimal::from(MS_PER_HOUR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_round_half_away_from_zero_negative() {
        // Negative halves move away from zero, not toward positive infinity
        assert_eq!(round2(dec!(-2.675)), dec!(-2.68));
        assert_eq!(round2(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn test_round_below_half() {
        assert_eq!(round2(dec!(2.674)), dec!(2.67));
        assert_eq!(round2(dec!(-2.674)), dec!(-2.67));
    }

    #[test]
    fn test_round_idempotent_on_cents() {
        assert_eq!(round2(dec!(38.00)), dec!(38.00));
        assert_eq!(round2(round2(dec!(7.777))), round2(dec!(7.777)));
    }

    #[test]
    fn test_billable_hours() {
        // 4h exactly
        assert_eq!(billable_hours(4 * MS_PER_HOUR), dec!(4));
        // 225 minutes = 3.75h
        assert_eq!(billable_hours(225 * 60 * 1000), dec!(3.75));
        // 100 minutes = 1.666...h, rounded to cents
        assert_eq!(billable_hours(100 * 60 * 1000), dec!(1.67));
        assert_eq!(billable_hours(0), dec!(0));
    }
}
