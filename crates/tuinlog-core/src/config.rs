//! Ledger-wide settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Hourly labour rate a fresh ledger starts with.
pub const DEFAULT_HOURLY_RATE: Decimal = dec!(38);

/// Tax fraction applied when neither the line nor the catalog carries one.
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.21);

/// Tunable business settings shared by every derivation.
///
/// The hourly rate prices the generated labour line; the default tax
/// rate covers lines that carry no rate of their own. Snapshots without
/// a settings block load with the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerSettings {
    /// Rate billed per worked hour on the generated labour line.
    pub hourly_rate: Decimal,

    /// Tax fraction for lines that do not carry their own rate.
    #[serde(rename = "vatRate")]
    pub default_tax_rate: Decimal,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
            default_tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl LedgerSettings {
    /// Creates settings with explicit rates.
    #[must_use]
    pub fn new(hourly_rate: Decimal, default_tax_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            default_tax_rate,
        }
    }
}
