//! Product catalog record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Bucket;

/// A sellable unit of work or material.
///
/// Log items and settlement lines snapshot the product's price at attach
/// time; later catalog edits only affect lines composed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Catalog name. The labour product is matched by the
    /// case-insensitive name `"arbeid"` during line composition.
    pub name: String,

    /// Unit label shown on settlement lines (e.g. "uur", "zak").
    #[serde(default)]
    pub unit: String,

    /// Price per unit.
    #[serde(default)]
    pub unit_price: Decimal,

    /// Tax fraction applied to invoiced lines (0.21 = 21%).
    #[serde(rename = "vatRate", default)]
    pub tax_rate: Decimal,

    /// Bucket that freshly composed lines for this product default into.
    #[serde(default)]
    pub default_bucket: Bucket,

    /// Marks records created by the demo seeder.
    #[serde(default)]
    pub demo: bool,
}

impl Product {
    /// Creates a product with a fresh id.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        unit_price: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            unit: unit.into(),
            unit_price,
            tax_rate,
            default_bucket: Bucket::default(),
            demo: false,
        }
    }

    /// Sets the default bucket for composed lines.
    #[must_use]
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.default_bucket = bucket;
        self
    }

    /// Flags the record as demo-seeded.
    #[must_use]
    pub fn with_demo(mut self) -> Self {
        self.demo = true;
        self
    }

    /// True when the product is the labour product lines bill hours against.
    #[must_use]
    pub fn is_labour(&self) -> bool {
        self.name.eq_ignore_ascii_case("arbeid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_labour_match_is_case_insensitive() {
        assert!(Product::new("Arbeid", "uur", dec!(38), dec!(0.21)).is_labour());
        assert!(Product::new("ARBEID", "uur", dec!(38), dec!(0.21)).is_labour());
        assert!(Product::new("arbeid", "uur", dec!(38), dec!(0.21)).is_labour());
        assert!(!Product::new("Arbeider", "uur", dec!(38), dec!(0.21)).is_labour());
        assert!(!Product::new("Groenafval", "zak", dec!(7.5), dec!(0.21)).is_labour());
    }

    #[test]
    fn test_builders() {
        let p = Product::new("Groenafval", "zak", dec!(7.5), dec!(0.21))
            .with_bucket(Bucket::Cash)
            .with_demo();
        assert_eq!(p.default_bucket, Bucket::Cash);
        assert!(p.demo);
    }

    #[test]
    fn test_serde_snapshot_keys() {
        let json = r#"{"id":"p1","name":"Parkeren","unit":"keer","unitPrice":4,"vatRate":0.21}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.unit_price, dec!(4));
        assert_eq!(p.tax_rate, dec!(0.21));
        // Fields added by later snapshot iterations default in
        assert_eq!(p.default_bucket, Bucket::Invoice);
        assert!(!p.demo);
    }
}
