//! Payment bucket classification.

use serde::{Deserialize, Serialize};

/// Payment channel of a settlement line.
///
/// Every line settles through exactly one of two channels. Invoiced
/// amounts collect tax on top of the subtotal; cash amounts settle net
/// and never accrue tax, whatever tax rate the line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Collected through an invoice; tax applies.
    #[default]
    Invoice,

    /// Settled in cash; no tax is ever applied.
    Cash,
}

impl Bucket {
    /// Returns the snapshot tag for the bucket.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Cash => "cash",
        }
    }

    /// Returns true for the cash channel.
    #[must_use]
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
