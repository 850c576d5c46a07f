//! Plain data handed out by the store.

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Logical time of a transaction: seconds plus sub-second nanos.
///
/// Opaque to record logic; it is copied into records and history entries
/// exactly as the store reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxTimestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl TxTimestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanos: at.timestamp_subsec_nanos() as i32,
        }
    }

    /// Convert back to a calendar time, if the value is in range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanos.max(0) as u32)
            .single()
    }
}

impl std::fmt::Display for TxTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "{}.{:09}", self.seconds, self.nanos),
        }
    }
}

/// One entry of a key's history, as yielded by a history cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    pub tx_id: String,
    pub timestamp: TxTimestamp,
    pub is_delete: bool,
    /// Value written by the transaction; empty for deletes.
    pub value: Bytes,
}

/// One entry of a range scan over the world state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_roundtrips_through_datetime() {
        let ts = TxTimestamp::new(1_551_188_076, 72_402_371);
        let at = ts.to_datetime().unwrap();
        assert_eq!(TxTimestamp::from_datetime(at), ts);
    }

    #[test]
    fn timestamp_display_is_rfc3339() {
        let ts = TxTimestamp::new(0, 0);
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn timestamp_serializes_as_seconds_and_nanos() {
        let ts = TxTimestamp::new(12, 34);
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json, serde_json::json!({"seconds": 12, "nanos": 34}));
    }

    #[test]
    fn timestamps_order_by_seconds_then_nanos() {
        assert!(TxTimestamp::new(1, 999) < TxTimestamp::new(2, 0));
        assert!(TxTimestamp::new(2, 1) > TxTimestamp::new(2, 0));
    }
}
