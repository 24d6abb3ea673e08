//! Merge of recomposed lines with operator bucket edits.
//!
//! Recomposition rebuilds a settlement's lines from scratch, which would
//! wipe the operator's bucket choices. The merge keeps them: every fresh
//! line that matches a prior line by identity takes the prior line's
//! bucket, everything else about the fresh line stands.

use std::collections::HashMap;

use tuinlog_core::{Bucket, SettlementLine};

/// Reconciles freshly composed lines with the lines they replace.
///
/// Identity is product id plus description. When the prior lines hold
/// duplicates of one identity the last occurrence wins. Fresh lines
/// without a prior match keep their composed bucket; prior lines with
/// no fresh match disappear.
#[must_use]
pub fn merge_lines(fresh: Vec<SettlementLine>, prior: &[SettlementLine]) -> Vec<SettlementLine> {
    let mut kept: HashMap<(Option<&str>, &str), Bucket> = HashMap::new();
    for line in prior {
        kept.insert(line.merge_key(), line.bucket);
    }
    fresh
        .into_iter()
        .map(|mut line| {
            let prior_bucket = kept.get(&line.merge_key()).copied();
            if let Some(bucket) = prior_bucket {
                line.bucket = bucket;
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn groen(quantity: rust_decimal::Decimal) -> SettlementLine {
        SettlementLine::new("Groenafval", quantity, dec!(38))
            .with_product("p-groen")
            .with_unit("keer")
    }

    #[test]
    fn test_prior_bucket_survives_recomposition() {
        let prior = vec![groen(dec!(1)).with_bucket(Bucket::Cash)];
        let fresh = vec![groen(dec!(3))];

        let merged = merge_lines(fresh, &prior);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].bucket, Bucket::Cash);
        // Everything but the bucket comes from the fresh line
        assert_eq!(merged[0].quantity, dec!(3));
    }

    #[test]
    fn test_unmatched_fresh_line_keeps_composed_bucket() {
        let prior = vec![groen(dec!(1)).with_bucket(Bucket::Cash)];
        let fresh = vec![SettlementLine::new("Parkeren", dec!(1), dec!(2.5))
            .with_product("p-park")
            .with_bucket(Bucket::Invoice)];

        let merged = merge_lines(fresh, &prior);

        assert_eq!(merged[0].bucket, Bucket::Invoice);
    }

    #[test]
    fn test_identity_is_product_and_description() {
        // Same product id, different description: no match
        let prior = vec![SettlementLine::new("Groenafval afvoer", dec!(1), dec!(38))
            .with_product("p-groen")
            .with_bucket(Bucket::Cash)];
        let fresh = vec![groen(dec!(2))];

        let merged = merge_lines(fresh, &prior);

        assert_eq!(merged[0].bucket, Bucket::Invoice);
    }

    #[test]
    fn test_duplicate_prior_identity_last_wins() {
        let prior = vec![
            groen(dec!(1)).with_bucket(Bucket::Cash),
            groen(dec!(1)).with_bucket(Bucket::Invoice),
        ];
        let fresh = vec![groen(dec!(2))];

        let merged = merge_lines(fresh, &prior);

        assert_eq!(merged[0].bucket, Bucket::Invoice);
    }

    #[test]
    fn test_prior_lines_without_fresh_match_disappear() {
        let prior = vec![
            groen(dec!(1)),
            SettlementLine::new("Handwerk", dec!(2), dec!(15)).with_bucket(Bucket::Cash),
        ];
        let fresh = vec![groen(dec!(1))];

        let merged = merge_lines(fresh, &prior);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description, "Groenafval");
    }

    #[test]
    fn test_free_lines_match_on_description_alone() {
        let mut prior_line = SettlementLine::new("Product", dec!(1), dec!(10));
        prior_line.bucket = Bucket::Cash;
        let fresh = vec![SettlementLine::new("Product", dec!(4), dec!(10))];

        let merged = merge_lines(fresh, &[prior_line]);

        assert_eq!(merged[0].bucket, Bucket::Cash);
        assert_eq!(merged[0].quantity, dec!(4));
    }
}
