//! Settlement mutations: linkage, recomposition, lifecycle, and lines.
//!
//! Any link change recomposes the settlement's lines from its logs and
//! runs the result through the merge policy, so operator bucket choices
//! survive. Paid flags and stored status never change on recompute.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tuinlog_core::{
    Bucket, LedgerError, LedgerResult, Settlement, SettlementLine, SettlementStatus, Timestamp,
    DEFAULT_TAX_RATE,
};

use crate::Ledger;

/// Operator input for a manually added settlement line.
///
/// Unset text fields fall back to the referenced product, then to the
/// generic line defaults.
#[derive(Debug, Clone, Default)]
pub struct LineDraft {
    /// Optional catalog reference; kept verbatim even when it dangles.
    pub product_id: Option<String>,

    /// Line description; falls back to the product name, then "Regel".
    pub description: Option<String>,

    /// Billing unit; falls back to the product unit, then "keer".
    pub unit: Option<String>,

    /// Billed quantity; must be strictly positive.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Destination bucket.
    pub bucket: Bucket,
}

impl Ledger {
    /// Creates an empty draft settlement for a customer and returns its
    /// id. The settlement lands at the front of the list.
    pub fn create_settlement(
        &mut self,
        customer_id: &str,
        date: NaiveDate,
        now: Timestamp,
    ) -> LedgerResult<String> {
        if self.customer(customer_id).is_none() {
            return Err(LedgerError::unknown_customer(customer_id));
        }
        let settlement = Settlement::new(customer_id, date, now);
        let settlement_id = settlement.id.clone();
        self.settlements.insert(0, settlement);
        info!(settlement_id = %settlement_id, customer_id = %customer_id, "Settlement created");
        Ok(settlement_id)
    }

    /// Creates a draft settlement around a single log, linking it and
    /// composing its lines in one step.
    pub fn create_settlement_for_log(
        &mut self,
        log_id: &str,
        date: NaiveDate,
        now: Timestamp,
    ) -> LedgerResult<String> {
        let customer_id = self
            .log(log_id)
            .map(|log| log.customer_id.clone())
            .ok_or_else(|| LedgerError::unknown_log(log_id))?;
        if let Some(owner) = self.settlement_for_log(log_id) {
            return Err(LedgerError::already_linked(log_id, owner.id.clone()));
        }

        let mut settlement = Settlement::new(customer_id, date, now);
        settlement.link(log_id);
        settlement.lines = tuinlog_billing::compose_lines(
            &settlement.log_ids,
            &self.logs,
            &self.products,
            &self.settings,
            now,
        )
        .lines;
        let settlement_id = settlement.id.clone();
        self.settlements.insert(0, settlement);
        info!(settlement_id = %settlement_id, log_id = %log_id, "Settlement created around log");
        Ok(settlement_id)
    }

    /// Links a log into a settlement and recomposes its lines.
    ///
    /// The log must belong to the settlement's customer and to no other
    /// settlement. Linking a log the settlement already lists is a
    /// no-op.
    pub fn link_log(
        &mut self,
        settlement_id: &str,
        log_id: &str,
        now: Timestamp,
    ) -> LedgerResult<()> {
        let index = self.settlement_position(settlement_id)?;
        let log_customer = self
            .log(log_id)
            .map(|log| log.customer_id.clone())
            .ok_or_else(|| LedgerError::unknown_log(log_id))?;

        if self.settlements[index].links_log(log_id) {
            return Ok(());
        }
        if let Some(owner) = self.settlement_for_log(log_id) {
            return Err(LedgerError::already_linked(log_id, owner.id.clone()));
        }
        if log_customer != self.settlements[index].customer_id {
            return Err(LedgerError::customer_mismatch(log_id, settlement_id));
        }

        self.settlements[index].link(log_id);
        self.refresh_lines(index, now);
        info!(settlement_id = %settlement_id, log_id = %log_id, "Work log linked");
        Ok(())
    }

    /// Releases a log from a settlement and recomposes its lines.
    pub fn unlink_log(
        &mut self,
        settlement_id: &str,
        log_id: &str,
        now: Timestamp,
    ) -> LedgerResult<()> {
        let index = self.settlement_position(settlement_id)?;
        self.settlements[index].unlink(log_id);
        self.refresh_lines(index, now);
        info!(settlement_id = %settlement_id, log_id = %log_id, "Work log unlinked");
        Ok(())
    }

    /// Recomposes the settlement's lines from its current logs, keeping
    /// operator bucket choices through the merge policy.
    pub fn recompute_lines(&mut self, settlement_id: &str, now: Timestamp) -> LedgerResult<()> {
        let index = self.settlement_position(settlement_id)?;
        self.refresh_lines(index, now);
        debug!(settlement_id = %settlement_id, "Lines recomputed");
        Ok(())
    }

    /// Moves the settlement to another customer.
    ///
    /// Settlements are single-customer, so the linked logs cannot
    /// follow: `log_ids` is cleared. Lines are left untouched.
    pub fn set_settlement_customer(
        &mut self,
        settlement_id: &str,
        customer_id: &str,
    ) -> LedgerResult<()> {
        if self.customer(customer_id).is_none() {
            return Err(LedgerError::unknown_customer(customer_id));
        }
        let settlement = self.settlement_mut(settlement_id)?;
        settlement.customer_id = customer_id.to_string();
        settlement.log_ids.clear();
        debug!(settlement_id = %settlement_id, customer_id = %customer_id, "Settlement customer changed");
        Ok(())
    }

    /// Sets the settlement date.
    pub fn set_settlement_date(
        &mut self,
        settlement_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        settlement.date = date;
        debug!(settlement_id = %settlement_id, date = %date, "Settlement date changed");
        Ok(())
    }

    /// Marks the settlement calculated. Idempotent.
    pub fn mark_calculated(&mut self, settlement_id: &str) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        settlement.status = SettlementStatus::Calculated;
        info!(settlement_id = %settlement_id, "Settlement marked calculated");
        Ok(())
    }

    /// Reopens a calculated settlement as a draft. Idempotent.
    pub fn revert_to_draft(&mut self, settlement_id: &str) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        settlement.status = SettlementStatus::Draft;
        info!(settlement_id = %settlement_id, "Settlement reverted to draft");
        Ok(())
    }

    /// Flips the invoice bucket's paid flag and returns the new value.
    ///
    /// A bucket with nothing to collect has no paid state to flip.
    pub fn toggle_invoice_paid(&mut self, settlement_id: &str) -> LedgerResult<bool> {
        let index = self.settlement_position(settlement_id)?;
        let state = tuinlog_billing::payment_state(
            &self.settlements[index],
            self.settings.default_tax_rate,
        );
        if !state.has_invoice {
            return Err(LedgerError::BucketEmpty {
                bucket: Bucket::Invoice,
            });
        }
        let settlement = &mut self.settlements[index];
        settlement.invoice_paid = !settlement.invoice_paid;
        let paid = settlement.invoice_paid;
        info!(settlement_id = %settlement_id, paid, "Invoice bucket toggled");
        Ok(paid)
    }

    /// Flips the cash bucket's paid flag and returns the new value.
    ///
    /// A bucket with nothing to collect has no paid state to flip.
    pub fn toggle_cash_paid(&mut self, settlement_id: &str) -> LedgerResult<bool> {
        let index = self.settlement_position(settlement_id)?;
        let state = tuinlog_billing::payment_state(
            &self.settlements[index],
            self.settings.default_tax_rate,
        );
        if !state.has_cash {
            return Err(LedgerError::BucketEmpty {
                bucket: Bucket::Cash,
            });
        }
        let settlement = &mut self.settlements[index];
        settlement.cash_paid = !settlement.cash_paid;
        let paid = settlement.cash_paid;
        info!(settlement_id = %settlement_id, paid, "Cash bucket toggled");
        Ok(paid)
    }

    /// Appends a manual line to the settlement and returns the line's
    /// id.
    ///
    /// Recomposition replaces the line set: a manual line's bucket
    /// carries over when a composed line shares its product and
    /// description, otherwise the line is dropped on the next
    /// recompute.
    pub fn add_line(&mut self, settlement_id: &str, draft: LineDraft) -> LedgerResult<String> {
        if draft.quantity <= Decimal::ZERO {
            return Err(LedgerError::invalid_quantity(draft.quantity));
        }
        let index = self.settlement_position(settlement_id)?;

        let product = draft.product_id.as_deref().and_then(|id| self.product(id));
        let description = draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .or_else(|| product.map(|p| p.name.clone()))
            .unwrap_or_else(|| "Regel".to_string());
        let unit = draft
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
            .or_else(|| product.map(|p| p.unit.clone()))
            .unwrap_or_else(|| "keer".to_string());
        let tax_rate = product.map_or(DEFAULT_TAX_RATE, |p| p.tax_rate);

        let mut line = SettlementLine::new(description, draft.quantity, draft.unit_price)
            .with_unit(unit)
            .with_tax_rate(tax_rate)
            .with_bucket(draft.bucket);
        if let Some(product_id) = draft.product_id {
            line = line.with_product(product_id);
        }
        let line_id = line.id.clone();
        self.settlements[index].lines.push(line);
        debug!(settlement_id = %settlement_id, line_id = %line_id, "Line added");
        Ok(line_id)
    }

    /// Sets a line's quantity. Unknown line ids are ignored.
    pub fn set_line_quantity(
        &mut self,
        settlement_id: &str,
        line_id: &str,
        quantity: Decimal,
    ) -> LedgerResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::invalid_quantity(quantity));
        }
        let settlement = self.settlement_mut(settlement_id)?;
        if let Some(line) = settlement.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
            debug!(settlement_id = %settlement_id, line_id = %line_id, quantity = %quantity, "Line quantity set");
        }
        Ok(())
    }

    /// Sets a line's unit price. Unknown line ids are ignored.
    pub fn set_line_unit_price(
        &mut self,
        settlement_id: &str,
        line_id: &str,
        unit_price: Decimal,
    ) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        if let Some(line) = settlement.lines.iter_mut().find(|l| l.id == line_id) {
            line.unit_price = unit_price;
            debug!(settlement_id = %settlement_id, line_id = %line_id, "Line price set");
        }
        Ok(())
    }

    /// Moves a line into the given payment bucket.
    ///
    /// This is the operator edit the merge policy preserves across
    /// recomposition.
    pub fn set_line_bucket(
        &mut self,
        settlement_id: &str,
        line_id: &str,
        bucket: Bucket,
    ) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        if let Some(line) = settlement.lines.iter_mut().find(|l| l.id == line_id) {
            line.bucket = bucket;
            debug!(settlement_id = %settlement_id, line_id = %line_id, bucket = %bucket, "Line bucket set");
        }
        Ok(())
    }

    /// Removes a line from the settlement.
    pub fn remove_line(&mut self, settlement_id: &str, line_id: &str) -> LedgerResult<()> {
        let settlement = self.settlement_mut(settlement_id)?;
        settlement.lines.retain(|l| l.id != line_id);
        debug!(settlement_id = %settlement_id, line_id = %line_id, "Line removed");
        Ok(())
    }

    /// Deletes a settlement. Its logs fall back to
    /// [`LogStatus::Free`](tuinlog_core::LogStatus::Free).
    pub fn delete_settlement(&mut self, settlement_id: &str) -> LedgerResult<()> {
        let index = self.settlement_position(settlement_id)?;
        self.settlements.remove(index);
        info!(settlement_id = %settlement_id, "Settlement deleted");
        Ok(())
    }

    fn refresh_lines(&mut self, index: usize, now: Timestamp) {
        let settlement = &self.settlements[index];
        let composed = tuinlog_billing::compose_lines(
            &settlement.log_ids,
            &self.logs,
            &self.products,
            &self.settings,
            now,
        );
        let merged = tuinlog_billing::merge_lines(composed.lines, &settlement.lines);
        self.settlements[index].lines = merged;
    }
}
