//! Work log mutations: the timer lifecycle, items, and segment repairs.
//!
//! The timer is single-slot: at most one log runs at a time, and the
//! running log owns the single open segment. Every guard fails before
//! anything is written.

use rust_decimal::Decimal;
use tracing::{debug, info};
use tuinlog_core::{LedgerError, LedgerResult, Log, LogItem, Segment, SegmentKind, Timestamp};

use crate::Ledger;

impl Ledger {
    /// Starts a new work log for `customer_id` and opens its first work
    /// segment at `now`.
    ///
    /// The log lands at the front of the list and becomes the active
    /// log. Returns the new log's id.
    pub fn start_log(&mut self, customer_id: &str, now: Timestamp) -> LedgerResult<String> {
        if let Some(active_id) = &self.active_log_id {
            return Err(LedgerError::ActiveLogExists {
                log_id: active_id.clone(),
            });
        }
        if self.customer(customer_id).is_none() {
            return Err(LedgerError::unknown_customer(customer_id));
        }

        let mut log = Log::new(customer_id, now.date_naive(), now);
        log.segments.push(Segment::open(SegmentKind::Work, now));
        let log_id = log.id.clone();
        self.logs.insert(0, log);
        self.active_log_id = Some(log_id.clone());
        info!(log_id = %log_id, customer_id = %customer_id, "Work log started");
        Ok(log_id)
    }

    /// Closes the open segment of the active log and opens one of the
    /// other kind at `now`.
    ///
    /// A log with no open segment resumes with a work segment. Returns
    /// the kind now running.
    pub fn toggle_break(&mut self, now: Timestamp) -> LedgerResult<SegmentKind> {
        let log = self.active_log_mut()?;
        let next = match log.open_segment_mut() {
            Some(segment) => {
                let next = segment.kind.toggled();
                segment.end = Some(now);
                next
            }
            None => SegmentKind::Work,
        };
        log.segments.push(Segment::open(next, now));
        debug!(log_id = %log.id, kind = next.name(), "Timer toggled");
        Ok(next)
    }

    /// Stops the active log: closes the open segment, stamps the
    /// closing instant, and clears the active pointer.
    pub fn stop_log(&mut self, now: Timestamp) -> LedgerResult<()> {
        let log = self.active_log_mut()?;
        if let Some(segment) = log.open_segment_mut() {
            segment.end = Some(now);
        }
        log.closed_at = Some(now);
        let log_id = log.id.clone();
        self.active_log_id = None;
        info!(log_id = %log_id, "Work log stopped");
        Ok(())
    }

    /// Attaches a product item to a log and returns the item's id.
    ///
    /// `unit_price: None` snapshots the current catalog price, so later
    /// catalog edits leave the item untouched.
    pub fn add_item(
        &mut self,
        log_id: &str,
        product_id: &str,
        quantity: Decimal,
        unit_price: Option<Decimal>,
    ) -> LedgerResult<String> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::invalid_quantity(quantity));
        }
        let catalog_price = self
            .product(product_id)
            .map(|p| p.unit_price)
            .ok_or_else(|| LedgerError::unknown_product(product_id))?;

        let log = self.log_mut(log_id)?;
        let item = LogItem::new(product_id, quantity, unit_price.unwrap_or(catalog_price));
        let item_id = item.id.clone();
        log.items.push(item);
        debug!(log_id = %log_id, product_id = %product_id, quantity = %quantity, "Item added");
        Ok(item_id)
    }

    /// Sets an item's quantity. Unknown item ids are ignored.
    pub fn set_item_quantity(
        &mut self,
        log_id: &str,
        item_id: &str,
        quantity: Decimal,
    ) -> LedgerResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::invalid_quantity(quantity));
        }
        let log = self.log_mut(log_id)?;
        if let Some(item) = log.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = Some(quantity);
            debug!(log_id = %log_id, item_id = %item_id, quantity = %quantity, "Item quantity set");
        }
        Ok(())
    }

    /// Sets an item's unit price. Unknown item ids are ignored.
    pub fn set_item_unit_price(
        &mut self,
        log_id: &str,
        item_id: &str,
        unit_price: Decimal,
    ) -> LedgerResult<()> {
        let log = self.log_mut(log_id)?;
        if let Some(item) = log.items.iter_mut().find(|i| i.id == item_id) {
            item.unit_price = unit_price;
            debug!(log_id = %log_id, item_id = %item_id, "Item price set");
        }
        Ok(())
    }

    /// Removes an item from a log.
    pub fn remove_item(&mut self, log_id: &str, item_id: &str) -> LedgerResult<()> {
        let log = self.log_mut(log_id)?;
        log.items.retain(|i| i.id != item_id);
        debug!(log_id = %log_id, item_id = %item_id, "Item removed");
        Ok(())
    }

    /// Replaces a log's note, trimmed.
    pub fn set_log_note(&mut self, log_id: &str, note: &str) -> LedgerResult<()> {
        let log = self.log_mut(log_id)?;
        log.note = note.trim().to_string();
        debug!(log_id = %log_id, "Note updated");
        Ok(())
    }

    /// Repairs a segment's span.
    ///
    /// A concrete `end` must land after `start`. Clearing `end` reopens
    /// the segment and is only allowed while no other segment of the
    /// log is open.
    pub fn edit_segment(
        &mut self,
        log_id: &str,
        segment_id: &str,
        start: Timestamp,
        end: Option<Timestamp>,
    ) -> LedgerResult<()> {
        let log = self.log_mut(log_id)?;
        let Some(position) = log.segments.iter().position(|s| s.id == segment_id) else {
            return Err(LedgerError::invalid_segment(format!(
                "no segment {segment_id} in log {log_id}"
            )));
        };
        match end {
            Some(end) if end <= start => {
                return Err(LedgerError::invalid_segment(format!(
                    "end {end} is not after start {start}"
                )));
            }
            None => {
                let other_open = log
                    .segments
                    .iter()
                    .enumerate()
                    .any(|(i, s)| i != position && s.is_open());
                if other_open {
                    return Err(LedgerError::invalid_segment(
                        "another segment is still open",
                    ));
                }
            }
            Some(_) => {}
        }

        let segment = &mut log.segments[position];
        segment.start = start;
        segment.end = end;
        debug!(log_id = %log_id, segment_id = %segment_id, "Segment edited");
        Ok(())
    }

    /// Deletes a work log.
    ///
    /// The active log must be stopped first; a linked log must be
    /// released by its settlement first. Any stale `log_ids` entries
    /// pointing at the id are pruned afterwards.
    pub fn delete_log(&mut self, log_id: &str) -> LedgerResult<()> {
        let position = self.log_position(log_id)?;
        if self.active_log_id.as_deref() == Some(log_id) {
            return Err(LedgerError::LogActive {
                log_id: log_id.to_string(),
            });
        }
        if let Some(owner) = self.settlement_for_log(log_id) {
            return Err(LedgerError::log_linked(log_id, owner.id.clone()));
        }

        self.logs.remove(position);
        for settlement in &mut self.settlements {
            settlement.unlink(log_id);
        }
        info!(log_id = %log_id, "Work log deleted");
        Ok(())
    }
}
