//! Demo data for a fresh installation.
//!
//! [`starter_ledger`] builds the catalog and customers a new ledger
//! opens with; [`seed_week`] fills an empty ledger with a week of
//! closed logs and one calculated settlement, deterministic for a
//! given `today` (ids excepted).

use chrono::{Days, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tuinlog_core::{
    Customer, LedgerResult, Log, LogItem, Product, Segment, SegmentKind, Timestamp,
};

use crate::Ledger;

/// Builds the ledger a fresh installation starts from: default
/// settings, two customers, and the four-product catalog.
#[must_use]
pub fn starter_ledger() -> Ledger {
    let now = Timestamp::now();
    let mut ledger = Ledger::new();

    ledger.customers.push(Customer::new("Van de Werf", "", now).with_address("Heverlee, Leuven"));
    ledger
        .customers
        .push(Customer::new("Kessel-Lo tuin", "", now).with_address("Kessel-Lo, Leuven"));

    ledger.products.push(Product::new("Arbeid", "uur", dec!(38), dec!(0.21)).with_demo());
    ledger.products.push(Product::new("Groenafval", "keer", dec!(38), dec!(0.21)).with_demo());
    ledger.products.push(Product::new("Parkeren", "keer", dec!(0), dec!(0.21)).with_demo());
    ledger.products.push(Product::new("Materiaal", "keer", dec!(0), dec!(0.21)).with_demo());

    ledger
}

/// Seeds seven closed demo logs ending `today`, plus one calculated
/// settlement bundling the first customer's oldest two logs.
///
/// Each day runs 08:30-12:30 with a 10:30-10:45 break. Customers
/// alternate per day; every second day hauls green waste, every fourth
/// pays parking, every third carries a note. Does nothing when the
/// ledger already has logs or has no customers.
pub fn seed_week(ledger: &mut Ledger, today: NaiveDate) -> LedgerResult<()> {
    if !ledger.logs.is_empty() {
        return Ok(());
    }
    let customer_ids: Vec<String> = ledger.customers.iter().map(|c| c.id.clone()).collect();
    if customer_ids.is_empty() {
        return Ok(());
    }

    let work_start = NaiveTime::from_hms_opt(8, 30, 0).expect("valid time");
    let break_start = NaiveTime::from_hms_opt(10, 30, 0).expect("valid time");
    let break_end = NaiveTime::from_hms_opt(10, 45, 0).expect("valid time");
    let work_end = NaiveTime::from_hms_opt(12, 30, 0).expect("valid time");

    let groen_id = product_id_by_name(ledger, "Groenafval");
    let parkeren_id = product_id_by_name(ledger, "Parkeren");

    for i in 0..7u64 {
        let date = today - Days::new(i);
        let customer_id = &customer_ids[(i as usize) % customer_ids.len()];

        let start = Timestamp::at(date, work_start);
        let mut log = Log::new(customer_id.clone(), date, start);
        log.segments.push(Segment::closed(
            SegmentKind::Work,
            start,
            Timestamp::at(date, break_start),
        ));
        log.segments.push(Segment::closed(
            SegmentKind::Break,
            Timestamp::at(date, break_start),
            Timestamp::at(date, break_end),
        ));
        log.segments.push(Segment::closed(
            SegmentKind::Work,
            Timestamp::at(date, break_end),
            Timestamp::at(date, work_end),
        ));
        log.closed_at = Some(Timestamp::at(date, work_end));

        if i % 3 == 0 {
            log.note = "Haag + borders".to_string();
        }
        if i % 2 == 0 {
            if let Some(product_id) = &groen_id {
                log.items.push(LogItem::new(
                    product_id.clone(),
                    Decimal::from(1 + (i % 3)),
                    dec!(38),
                ));
            }
        }
        if i % 4 == 0 {
            if let Some(product_id) = &parkeren_id {
                log.items.push(LogItem::new(product_id.clone(), dec!(1), dec!(2.5)));
            }
        }

        ledger.logs.insert(0, log);
    }

    // Bundle the first customer's oldest two logs into one settlement
    let oldest: Vec<String> = ledger
        .logs
        .iter()
        .filter(|log| log.customer_id == customer_ids[0])
        .map(|log| log.id.clone())
        .take(2)
        .collect();
    if oldest.len() == 2 {
        let now = Timestamp::at(today, work_end);
        let settlement_id = ledger.create_settlement(&customer_ids[0], today, now)?;
        for log_id in &oldest {
            ledger.link_log(&settlement_id, log_id, now)?;
        }
        ledger.mark_calculated(&settlement_id)?;
        ledger.settlement_mut(&settlement_id)?.demo = true;
    }

    info!(logs = ledger.logs.len(), "Demo week seeded");
    Ok(())
}

fn product_id_by_name(ledger: &Ledger, name: &str) -> Option<String> {
    ledger
        .products
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id.clone())
}
