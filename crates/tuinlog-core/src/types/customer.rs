//! Customer catalog record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Timestamp;

/// A customer of the business.
///
/// Work logs and settlements reference customers by id. Deleting a
/// customer is refused by the ledger while such references exist, but
/// the data model itself tolerates dangling ids in foreign snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier.
    pub id: String,

    /// Short informal name used in day-to-day views.
    #[serde(default)]
    pub nickname: String,

    /// Formal name for settlement documents.
    #[serde(default)]
    pub name: String,

    /// Postal address, free-form.
    #[serde(default)]
    pub address: String,

    /// Creation instant.
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Customer {
    /// Creates a customer with a fresh id.
    #[must_use]
    pub fn new(nickname: impl Into<String>, name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            nickname: nickname.into(),
            name: name.into(),
            address: String::new(),
            created_at: now,
        }
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Preferred display label: nickname first, formal name as fallback.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.name
        } else {
            &self.nickname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_nickname() {
        let now = Timestamp::from_millis(0);
        let c = Customer::new("Van de Werf", "Gemeente Werf BV", now);
        assert_eq!(c.display_name(), "Van de Werf");

        let formal_only = Customer::new("", "Gemeente Werf BV", now);
        assert_eq!(formal_only.display_name(), "Gemeente Werf BV");
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let now = Timestamp::from_millis(0);
        let a = Customer::new("a", "a", now);
        let b = Customer::new("b", "b", now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_defaults() {
        // Minimal legacy record: only id and nickname present
        let json = r#"{"id":"c1","nickname":"Kessel-Lo tuin"}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, "c1");
        assert_eq!(c.name, "");
        assert_eq!(c.address, "");
        assert_eq!(c.created_at, Timestamp::from_millis(0));
    }
}
