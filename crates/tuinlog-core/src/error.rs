//! Error types for the Tuinlog engine.
//!
//! Every guarded ledger mutation reports through this taxonomy. A guard
//! failure always leaves the ledger untouched.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Bucket;

/// A specialized Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// The main error type for ledger operations.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    /// A log can belong to at most one settlement.
    #[error("Work log {log_id} is already linked to settlement {settlement_id}")]
    AlreadyLinked {
        /// The claimed log.
        log_id: String,
        /// The settlement that already lists it.
        settlement_id: String,
    },

    /// A linked log cannot be deleted.
    #[error("Work log {log_id} is still linked to settlement {settlement_id}")]
    LogLinked {
        /// The log being deleted.
        log_id: String,
        /// The settlement that still lists it.
        settlement_id: String,
    },

    /// A referenced customer cannot be deleted.
    #[error("Customer {customer_id} still has logs or settlements")]
    CustomerInUse {
        /// The customer being deleted.
        customer_id: String,
    },

    /// A referenced product cannot be deleted.
    #[error("Product {product_id} is used by log items or settlement lines")]
    ProductInUse {
        /// The product being deleted.
        product_id: String,
    },

    /// A segment edit would produce a malformed span.
    #[error("Invalid segment: {reason}")]
    InvalidSegment {
        /// Description of the malformed edit.
        reason: String,
    },

    /// Append and edit operations require a strictly positive quantity.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: Decimal,
    },

    /// Starting a log while another is still running.
    #[error("Work log {log_id} is still active")]
    ActiveLogExists {
        /// The log that is currently running.
        log_id: String,
    },

    /// Pause and stop require a running log.
    #[error("No work log is currently active")]
    NoActiveLog,

    /// The active log cannot be deleted before being stopped.
    #[error("Work log {log_id} is active; stop it first")]
    LogActive {
        /// The running log.
        log_id: String,
    },

    /// Settlements are single-customer; linked logs must match.
    #[error("Work log {log_id} belongs to a different customer than settlement {settlement_id}")]
    CustomerMismatch {
        /// The log being linked.
        log_id: String,
        /// The settlement it was offered to.
        settlement_id: String,
    },

    /// A bucket with no collectible amount cannot change paid state.
    #[error("The {bucket} bucket has no billable amount")]
    BucketEmpty {
        /// The inert bucket.
        bucket: Bucket,
    },

    /// Lookup by id failed for a work log.
    #[error("Work log not found: {log_id}")]
    UnknownLog {
        /// The missing id.
        log_id: String,
    },

    /// Lookup by id failed for a settlement.
    #[error("Settlement not found: {settlement_id}")]
    UnknownSettlement {
        /// The missing id.
        settlement_id: String,
    },

    /// Lookup by id failed for a customer.
    #[error("Customer not found: {customer_id}")]
    UnknownCustomer {
        /// The missing id.
        customer_id: String,
    },

    /// Lookup by id failed for a product.
    #[error("Product not found: {product_id}")]
    UnknownProduct {
        /// The missing id.
        product_id: String,
    },

    /// Stored state violates a ledger invariant.
    #[error("Invalid ledger state: {reason}")]
    InvalidLedger {
        /// Description of the violation.
        reason: String,
    },
}

impl LedgerError {
    /// Creates an already-linked error.
    #[must_use]
    pub fn already_linked(log_id: impl Into<String>, settlement_id: impl Into<String>) -> Self {
        Self::AlreadyLinked {
            log_id: log_id.into(),
            settlement_id: settlement_id.into(),
        }
    }

    /// Creates a log-linked error.
    #[must_use]
    pub fn log_linked(log_id: impl Into<String>, settlement_id: impl Into<String>) -> Self {
        Self::LogLinked {
            log_id: log_id.into(),
            settlement_id: settlement_id.into(),
        }
    }

    /// Creates a customer-in-use error.
    #[must_use]
    pub fn customer_in_use(customer_id: impl Into<String>) -> Self {
        Self::CustomerInUse {
            customer_id: customer_id.into(),
        }
    }

    /// Creates a product-in-use error.
    #[must_use]
    pub fn product_in_use(product_id: impl Into<String>) -> Self {
        Self::ProductInUse {
            product_id: product_id.into(),
        }
    }

    /// Creates an invalid segment error.
    #[must_use]
    pub fn invalid_segment(reason: impl Into<String>) -> Self {
        Self::InvalidSegment {
            reason: reason.into(),
        }
    }

    /// Creates an invalid quantity error.
    #[must_use]
    pub fn invalid_quantity(quantity: Decimal) -> Self {
        Self::InvalidQuantity { quantity }
    }

    /// Creates an unknown-log error.
    #[must_use]
    pub fn unknown_log(log_id: impl Into<String>) -> Self {
        Self::UnknownLog {
            log_id: log_id.into(),
        }
    }

    /// Creates an unknown-settlement error.
    #[must_use]
    pub fn unknown_settlement(settlement_id: impl Into<String>) -> Self {
        Self::UnknownSettlement {
            settlement_id: settlement_id.into(),
        }
    }

    /// Creates an unknown-customer error.
    #[must_use]
    pub fn unknown_customer(customer_id: impl Into<String>) -> Self {
        Self::UnknownCustomer {
            customer_id: customer_id.into(),
        }
    }

    /// Creates an unknown-product error.
    #[must_use]
    pub fn unknown_product(product_id: impl Into<String>) -> Self {
        Self::UnknownProduct {
            product_id: product_id.into(),
        }
    }

    /// Creates a customer-mismatch error.
    #[must_use]
    pub fn customer_mismatch(log_id: impl Into<String>, settlement_id: impl Into<String>) -> Self {
        Self::CustomerMismatch {
            log_id: log_id.into(),
            settlement_id: settlement_id.into(),
        }
    }

    /// Creates an invalid-ledger error.
    #[must_use]
    pub fn invalid_ledger(reason: impl Into<String>) -> Self {
        Self::InvalidLedger {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = LedgerError::already_linked("l1", "s1");
        assert!(err.to_string().contains("already linked to settlement s1"));
    }

    #[test]
    fn test_quantity_error() {
        let err = LedgerError::invalid_quantity(dec!(-2));
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn test_bucket_empty_names_bucket() {
        let err = LedgerError::BucketEmpty {
            bucket: Bucket::Cash,
        };
        assert!(err.to_string().contains("cash"));
    }
}
