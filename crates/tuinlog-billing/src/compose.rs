//! Settlement line composition from linked work logs.
//!
//! Composition prices a settlement's linked logs into lines: one labour
//! line billing the accumulated work hours, then one line per product
//! group accumulated over the logs' loose items. The result is a fresh
//! line set; reconciling it with operator edits is the job of
//! [`merge_lines`](crate::merge::merge_lines).

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use tuinlog_core::{
    billable_hours, round2, Bucket, LedgerSettings, Log, Product, SettlementLine, Timestamp,
    DEFAULT_TAX_RATE,
};

use crate::duration::work_duration_ms;

/// One product's accumulated items across the linked logs.
struct ItemGroup {
    product_id: Option<String>,
    quantity: Decimal,
    unit_price: Decimal,
}

/// Result of composing settlement lines from a set of linked logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedLines {
    /// Total work milliseconds across the resolved logs
    pub work_ms: i64,
    /// Work converted to billable hours, rounded to two decimals
    pub hours: Decimal,
    /// Labour line first (when hours are positive), then one line per
    /// product group in first-seen order
    pub lines: Vec<SettlementLine>,
}

impl ComposedLines {
    /// Composes lines for the logs in `log_ids`.
    ///
    /// Ids that resolve to no log are skipped silently. Items group per
    /// product in first-seen order, free items (no product) forming one
    /// group of their own; within a group quantities add up and the last
    /// non-zero unit price wins.
    ///
    /// The labour line appears only when the rounded hours are positive.
    /// It bills the configured hourly rate into the invoice bucket,
    /// regardless of how the catalog's labour product is set up.
    #[must_use]
    pub fn from_logs(
        log_ids: &[String],
        logs: &[Log],
        catalog: &[Product],
        settings: &LedgerSettings,
        now: Timestamp,
    ) -> Self {
        let mut work_ms = 0;
        let mut groups: Vec<ItemGroup> = Vec::new();

        for id in log_ids {
            let Some(log) = logs.iter().find(|log| &log.id == id) else {
                continue;
            };
            work_ms += work_duration_ms(log, now);
            for item in &log.items {
                let idx = match groups
                    .iter()
                    .position(|group| group.product_id == item.product_id)
                {
                    Some(idx) => idx,
                    None => {
                        groups.push(ItemGroup {
                            product_id: item.product_id.clone(),
                            quantity: Decimal::ZERO,
                            unit_price: item.unit_price,
                        });
                        groups.len() - 1
                    }
                };
                let group = &mut groups[idx];
                group.quantity += item.quantity.unwrap_or(Decimal::ZERO);
                if item.unit_price != Decimal::ZERO {
                    group.unit_price = item.unit_price;
                }
            }
        }

        let hours = billable_hours(work_ms);
        let mut lines = Vec::with_capacity(groups.len() + 1);
        if hours > Decimal::ZERO {
            lines.push(labour_line(hours, catalog, settings));
        }
        for group in groups {
            lines.push(group_line(group, catalog));
        }

        Self {
            work_ms,
            hours,
            lines,
        }
    }
}

/// Composes labour and product lines for the logs in `log_ids`.
#[must_use]
pub fn compose_lines(
    log_ids: &[String],
    logs: &[Log],
    catalog: &[Product],
    settings: &LedgerSettings,
    now: Timestamp,
) -> ComposedLines {
    ComposedLines::from_logs(log_ids, logs, catalog, settings, now)
}

fn labour_line(hours: Decimal, catalog: &[Product], settings: &LedgerSettings) -> SettlementLine {
    let labour = catalog.iter().find(|product| product.is_labour());
    let mut line = SettlementLine::new(
        labour.map_or("Arbeid", |product| product.name.as_str()),
        hours,
        settings.hourly_rate,
    )
    .with_unit(labour.map_or("uur", |product| product.unit.as_str()))
    .with_tax_rate(labour.map_or(DEFAULT_TAX_RATE, |product| product.tax_rate))
    .with_bucket(Bucket::Invoice);
    if let Some(product) = labour {
        line = line.with_product(product.id.clone());
    }
    line
}

fn group_line(group: ItemGroup, catalog: &[Product]) -> SettlementLine {
    let product = group
        .product_id
        .as_deref()
        .and_then(|id| catalog.iter().find(|product| product.id == id));
    let mut line = SettlementLine::new(
        product.map_or("Product", |product| product.name.as_str()),
        round2(group.quantity),
        round2(group.unit_price),
    )
    .with_unit(product.map_or("keer", |product| product.unit.as_str()))
    .with_tax_rate(product.map_or(DEFAULT_TAX_RATE, |product| product.tax_rate))
    .with_bucket(product.map_or(Bucket::Invoice, |product| product.default_bucket));
    if let Some(id) = group.product_id {
        line = line.with_product(id);
    }
    line
}
