//! Stored and derived lifecycle states.

use serde::{Deserialize, Serialize};

/// Stored lifecycle state of a settlement.
///
/// Two states only: a settlement is editable in `Draft` and frozen for
/// billing in `Calculated`. Payment is tracked separately per bucket, so
/// "paid" is a derived condition, never a stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Being assembled; lines may still change.
    #[default]
    Draft,

    /// Finalized for billing.
    Calculated,
}

impl SettlementStatus {
    /// Returns the snapshot tag for the status.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Calculated => "calculated",
        }
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Derived lifecycle state of a work log.
///
/// Projected fresh from the log's owning settlement on every query;
/// never stored. Precedence when deriving: `Paid` over `Calculated`
/// over `Linked` over `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    /// Not linked to any settlement.
    #[default]
    Free,

    /// Linked to a settlement that is still a draft.
    Linked,

    /// Linked to a calculated settlement that is not yet fully paid.
    Calculated,

    /// Linked to a settlement whose collectible buckets are all paid.
    Paid,
}

impl LogStatus {
    /// Returns a lowercase tag for the status.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Linked => "linked",
            Self::Calculated => "calculated",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
