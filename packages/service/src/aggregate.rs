//! Draining state-store cursors into result entries.
//!
//! A cursor is wrapped in a [`ScopedCursor`] as soon as it is opened, so it
//! is closed exactly once however aggregation ends: exhaustion, a store
//! error, or the caller dropping the future half way.

use donation_ledger_state::{KeyModification, KeyValue, StateError, StateIterator, TxTimestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One modification of a key, as reported by a history query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryEntry {
    pub tx_id: String,
    pub timestamp: TxTimestamp,
    pub is_delete: bool,
    /// Parsed JSON, or the raw text when the stored bytes are not JSON.
    pub value: JsonValue,
}

/// One key of a range query with its current record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RangeEntry {
    pub key: String,
    /// Parsed JSON, or the raw text when the stored bytes are not JSON.
    pub record: JsonValue,
}

/// A cursor item that can be turned into a result entry.
pub trait AggregateItem: Send {
    type Entry;

    /// Whether the item carries a value. Items without one are skipped.
    fn has_value(&self) -> bool;

    fn into_entry(self) -> Self::Entry;
}

impl AggregateItem for KeyModification {
    type Entry = HistoryEntry;

    fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            value: parse_or_text(&self.value),
            tx_id: self.tx_id,
            timestamp: self.timestamp,
            is_delete: self.is_delete,
        }
    }
}

impl AggregateItem for KeyValue {
    type Entry = RangeEntry;

    fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    fn into_entry(self) -> RangeEntry {
        RangeEntry {
            record: parse_or_text(&self.value),
            key: self.key,
        }
    }
}

/// JSON value of `bytes`, falling back to their text.
pub fn parse_or_text(bytes: &[u8]) -> JsonValue {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Owns a store cursor and closes it when dropped.
pub struct ScopedCursor<I: StateIterator> {
    cursor: I,
}

impl<I: StateIterator> ScopedCursor<I> {
    pub fn new(cursor: I) -> Self {
        Self { cursor }
    }
}

impl<I> ScopedCursor<I>
where
    I: StateIterator,
    I::Item: AggregateItem,
{
    /// Next entry with a value, or `None` once the cursor is exhausted.
    pub async fn next_entry(
        &mut self,
    ) -> Result<Option<<I::Item as AggregateItem>::Entry>, StateError> {
        while let Some(item) = self.cursor.next().await? {
            if item.has_value() {
                return Ok(Some(item.into_entry()));
            }
        }
        Ok(None)
    }
}

impl<I: StateIterator> Drop for ScopedCursor<I> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}

/// Drain `cursor` to exhaustion, keeping its order and skipping empty items.
pub async fn collect<I>(cursor: I) -> Result<Vec<<I::Item as AggregateItem>::Entry>, StateError>
where
    I: StateIterator,
    I::Item: AggregateItem,
{
    let mut scoped = ScopedCursor::new(cursor);
    let mut entries = Vec::new();
    while let Some(entry) = scoped.next_entry().await? {
        entries.push(entry);
    }
    Ok(entries)
}
