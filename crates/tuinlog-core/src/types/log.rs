//! Work log records: timed segments and attached items.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Timestamp;

/// Kind of a timed segment within a work log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Billable working time.
    #[default]
    Work,

    /// Unbilled pause.
    Break,
}

impl SegmentKind {
    /// Returns the snapshot tag for the kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Returns the kind a pause toggle switches to.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A contiguous timed span within a work log.
///
/// An open segment has no end; its duration is measured against "now"
/// at query time. A log never carries more than one open segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Unique identifier.
    pub id: String,

    /// Whether the span is working time or a break.
    #[serde(rename = "type")]
    pub kind: SegmentKind,

    /// Start instant.
    pub start: Timestamp,

    /// End instant; `None` while the segment is still running.
    #[serde(default)]
    pub end: Option<Timestamp>,
}

impl Segment {
    /// Opens a fresh running segment.
    #[must_use]
    pub fn open(kind: SegmentKind, start: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            start,
            end: None,
        }
    }

    /// Creates a closed segment.
    #[must_use]
    pub fn closed(kind: SegmentKind, start: Timestamp, end: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            start,
            end: Some(end),
        }
    }

    /// True while the segment has no end.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Milliseconds covered by the segment, measured against `now` while
    /// open and clamped at zero for malformed spans.
    #[must_use]
    pub fn span_ms(&self, now: Timestamp) -> i64 {
        self.end.unwrap_or(now).since(self.start)
    }
}

/// A material or service attached to a work log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogItem {
    /// Unique identifier.
    pub id: String,

    /// Catalog product this item was taken from; may dangle after the
    /// product is deleted from a foreign snapshot.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Quantity in the product's unit; `None` when not yet entered.
    #[serde(rename = "qty", default)]
    pub quantity: Option<Decimal>,

    /// Price per unit, snapshotted when the item was attached.
    #[serde(default)]
    pub unit_price: Decimal,

    /// Free-form note.
    #[serde(default)]
    pub note: String,
}

impl LogItem {
    /// Creates an item with a fresh id.
    #[must_use]
    pub fn new(product_id: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id: Some(product_id.into()),
            quantity: Some(quantity),
            unit_price,
            note: String::new(),
        }
    }
}

/// A timestamped work visit: timed segments plus attached items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Unique identifier.
    pub id: String,

    /// Customer the visit was for.
    pub customer_id: String,

    /// Calendar day of the visit.
    pub date: NaiveDate,

    /// Creation instant.
    pub created_at: Timestamp,

    /// Instant the log was stopped; `None` while running.
    #[serde(default)]
    pub closed_at: Option<Timestamp>,

    /// Free-form note.
    #[serde(default)]
    pub note: String,

    /// Timed work and break spans.
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// Materials attached during the visit.
    #[serde(default)]
    pub items: Vec<LogItem>,
}

impl Log {
    /// Creates an empty log with a fresh id.
    #[must_use]
    pub fn new(customer_id: impl Into<String>, date: NaiveDate, created_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            date,
            created_at,
            closed_at: None,
            note: String::new(),
            segments: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Returns the currently running segment, if any.
    #[must_use]
    pub fn open_segment(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.is_open())
    }

    /// Mutable access to the currently running segment.
    pub fn open_segment_mut(&mut self) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.is_open())
    }

    /// True once the log has been stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}
