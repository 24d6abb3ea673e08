//! Logbook summaries over a settlement's linked logs.
//!
//! The settlement sheet quotes what the linked logs are worth before any
//! lines exist: hours at the going rate plus loose item costs. The quote
//! multiplies unrounded hours, so it can differ by a cent from the
//! composed labour line, which bills hours rounded to two decimals.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use tuinlog_core::{round2, Log, Settlement, Timestamp, MS_PER_HOUR};

use crate::duration::work_duration_ms;
use crate::totals::items_amount;

/// What a settlement's linked logs add up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookSummary {
    /// Linked log ids that resolved to a log
    pub linked_count: usize,
    /// Work milliseconds across the resolved logs
    pub total_work_ms: i64,
    /// Item costs across the resolved logs, rounded
    pub total_product_costs: Decimal,
    /// Unrounded hours at the hourly rate plus product costs, rounded
    pub total_log_price: Decimal,
}

impl LogbookSummary {
    /// Summarizes the logs a settlement links.
    ///
    /// Ids that resolve to no log are skipped and not counted.
    #[must_use]
    pub fn from_settlement(
        settlement: &Settlement,
        logs: &[Log],
        hourly_rate: Decimal,
        now: Timestamp,
    ) -> Self {
        let linked: Vec<&Log> = settlement
            .log_ids
            .iter()
            .filter_map(|id| logs.iter().find(|log| &log.id == id))
            .collect();

        let total_work_ms: i64 = linked.iter().map(|log| work_duration_ms(log, now)).sum();
        let total_product_costs = round2(linked.iter().map(|log| items_amount(log)).sum());
        let raw_hours = Decimal::from(total_work_ms) / Decimal::from(MS_PER_HOUR);

        Self {
            linked_count: linked.len(),
            total_work_ms,
            total_product_costs,
            total_log_price: round2(raw_hours * hourly_rate + total_product_costs),
        }
    }
}

/// Summarizes the logs a settlement links.
#[must_use]
pub fn logbook_summary(
    settlement: &Settlement,
    logs: &[Log],
    hourly_rate: Decimal,
    now: Timestamp,
) -> LogbookSummary {
    LogbookSummary::from_settlement(settlement, logs, hourly_rate, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tuinlog_core::{LogItem, Segment, SegmentKind};

    fn work_log(id: &str, minutes: i64, items: Vec<LogItem>) -> Log {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut log = Log::new("cust-1", date, Timestamp::from_millis(0));
        log.id = id.to_string();
        if minutes > 0 {
            log.segments = vec![Segment::closed(
                SegmentKind::Work,
                Timestamp::from_millis(0),
                Timestamp::from_millis(minutes * 60_000),
            )];
        }
        log.items = items;
        log
    }

    fn linking(log_ids: &[&str]) -> Settlement {
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let mut s = Settlement::new("cust-1", date, Timestamp::from_millis(0));
        for id in log_ids {
            s.link(*id);
        }
        s
    }

    #[test]
    fn test_sums_work_and_items_across_logs() {
        let logs = vec![
            work_log("log-1", 120, vec![LogItem::new("p-1", dec!(2), dec!(38))]),
            work_log("log-2", 105, vec![LogItem::new("p-2", dec!(1), dec!(2.5))]),
        ];
        let s = linking(&["log-1", "log-2"]);

        let summary = logbook_summary(&s, &logs, dec!(38), Timestamp::from_millis(0));

        assert_eq!(summary.linked_count, 2);
        assert_eq!(summary.total_work_ms, 225 * 60_000);
        // Items: 76.00 + 2.50
        assert_eq!(summary.total_product_costs, dec!(78.50));
        // 3.75h x 38 = 142.50, plus 78.50
        assert_eq!(summary.total_log_price, dec!(221.00));
    }

    #[test]
    fn test_price_uses_unrounded_hours() {
        // 100 min = 1.666..h; raw: 63.33, rounded-hours would give 63.46
        let logs = vec![work_log("log-1", 100, vec![])];
        let s = linking(&["log-1"]);

        let summary = logbook_summary(&s, &logs, dec!(38), Timestamp::from_millis(0));

        assert_eq!(summary.total_log_price, dec!(63.33));
    }

    #[test]
    fn test_unresolved_ids_are_not_counted() {
        let logs = vec![work_log("log-1", 60, vec![])];
        let s = linking(&["log-1", "gone"]);

        let summary = logbook_summary(&s, &logs, dec!(38), Timestamp::from_millis(0));

        assert_eq!(summary.linked_count, 1);
        assert_eq!(summary.total_work_ms, 60 * 60_000);
    }

    #[test]
    fn test_settlement_without_links_is_all_zero() {
        let s = linking(&[]);
        let summary = logbook_summary(&s, &[], dec!(38), Timestamp::from_millis(0));
        assert_eq!(summary, LogbookSummary::default());
    }
}
