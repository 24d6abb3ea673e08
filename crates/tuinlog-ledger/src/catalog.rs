//! Catalog mutations: customers, products, and their deletion guards.
//!
//! Records are normalized the way the entry forms do it: text fields
//! trimmed, a blank product unit falling back to "keer". Deletion is
//! refused while anything still references the record; deleting the
//! referencing records first unblocks it.

use tracing::{debug, info};
use tuinlog_core::{Customer, LedgerError, LedgerResult, Product};

use crate::Ledger;

fn normalized_customer(mut customer: Customer) -> Customer {
    customer.nickname = customer.nickname.trim().to_string();
    customer.name = customer.name.trim().to_string();
    customer.address = customer.address.trim().to_string();
    customer
}

fn normalized_product(mut product: Product) -> Product {
    product.name = product.name.trim().to_string();
    let unit = product.unit.trim();
    product.unit = if unit.is_empty() {
        "keer".to_string()
    } else {
        unit.to_string()
    };
    product
}

impl Ledger {
    /// Adds a customer and returns its id.
    pub fn add_customer(&mut self, customer: Customer) -> String {
        let customer = normalized_customer(customer);
        let customer_id = customer.id.clone();
        self.customers.push(customer);
        debug!(customer_id = %customer_id, "Customer added");
        customer_id
    }

    /// Replaces a stored customer by id.
    pub fn update_customer(&mut self, customer: Customer) -> LedgerResult<()> {
        let customer = normalized_customer(customer);
        let Some(slot) = self.customers.iter_mut().find(|c| c.id == customer.id) else {
            return Err(LedgerError::unknown_customer(customer.id));
        };
        *slot = customer;
        debug!(customer_id = %slot.id, "Customer updated");
        Ok(())
    }

    /// Deletes a customer no log or settlement references.
    pub fn delete_customer(&mut self, customer_id: &str) -> LedgerResult<()> {
        if self.customer(customer_id).is_none() {
            return Err(LedgerError::unknown_customer(customer_id));
        }
        let referenced = self.logs.iter().any(|l| l.customer_id == customer_id)
            || self.settlements.iter().any(|s| s.customer_id == customer_id);
        if referenced {
            return Err(LedgerError::customer_in_use(customer_id));
        }
        self.customers.retain(|c| c.id != customer_id);
        info!(customer_id = %customer_id, "Customer deleted");
        Ok(())
    }

    /// Adds a product and returns its id.
    pub fn add_product(&mut self, product: Product) -> String {
        let product = normalized_product(product);
        let product_id = product.id.clone();
        self.products.push(product);
        debug!(product_id = %product_id, "Product added");
        product_id
    }

    /// Replaces a stored product by id.
    ///
    /// Existing log items and settlement lines keep their price
    /// snapshots; the update only affects future use.
    pub fn update_product(&mut self, product: Product) -> LedgerResult<()> {
        let product = normalized_product(product);
        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            return Err(LedgerError::unknown_product(product.id));
        };
        *slot = product;
        debug!(product_id = %slot.id, "Product updated");
        Ok(())
    }

    /// Deletes a product no log item or settlement line references.
    pub fn delete_product(&mut self, product_id: &str) -> LedgerResult<()> {
        if self.product(product_id).is_none() {
            return Err(LedgerError::unknown_product(product_id));
        }
        let in_items = self
            .logs
            .iter()
            .flat_map(|l| &l.items)
            .any(|i| i.product_id.as_deref() == Some(product_id));
        let in_lines = self
            .settlements
            .iter()
            .flat_map(|s| &s.lines)
            .any(|l| l.product_id.as_deref() == Some(product_id));
        if in_items || in_lines {
            return Err(LedgerError::product_in_use(product_id));
        }
        self.products.retain(|p| p.id != product_id);
        info!(product_id = %product_id, "Product deleted");
        Ok(())
    }
}
