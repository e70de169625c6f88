use chrono::SubsecRound;

/// Request records are keyed by an opaque UUID.
pub type RequestId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Drop sub-microsecond digits, matching PostgreSQL `TIMESTAMPTZ` resolution.
///
/// Record timestamps pass through this on the way in, so a record compares
/// equal to itself after a database round trip.
pub fn truncate_to_micros(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(6)
}
