use chrono::{DateTime, Utc};

/// A fact recorded by an aggregate.
///
/// Events are immutable and append-only. The type name and schema version
/// stay stable so stored histories can be replayed by later builds.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Identifier of the aggregate the event belongs to.
    type AggregateId: Copy + Eq + core::fmt::Debug;

    /// Schema version shared by every variant of this event type.
    const SCHEMA_VERSION: u32 = 1;

    /// Stable event name (e.g. "ordering.order.placed").
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> Self::AggregateId;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
