//! In-memory ledger with per-key history.
//!
//! Writes made through a [`Transaction`] are buffered and only reach the
//! world state on [`Transaction::commit`]. Reads inside a transaction always
//! see the committed world state, never the transaction's own pending writes.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::traits::{HistoryIterator, RangeIterator, StateIterator, StateStore};
use crate::{KeyModification, KeyValue, StateError, TxTimestamp};

/// An in-memory ledger: world state plus an append-only history per key.
///
/// # Example
///
/// ```rust
/// use donation_ledger_state::{InMemoryLedger, StateStore, Bytes};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut ledger = InMemoryLedger::new();
///
/// let mut tx = ledger.begin();
/// tx.put_state("donation", Bytes::from_static(b"{}")).await.unwrap();
/// let tx_id = tx.commit();
///
/// assert_eq!(tx_id.len(), 64);
/// assert_eq!(ledger.world_state().len(), 1);
/// # });
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    pub(crate) world: BTreeMap<String, Bytes>,
    pub(crate) history: BTreeMap<String, Vec<KeyModification>>,
    pub(crate) height: u64,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transaction with a fresh id and the current time.
    pub fn begin(&mut self) -> Transaction<'_> {
        self.begin_at(generate_tx_id(), TxTimestamp::now())
    }

    /// Start a transaction with a caller-chosen id and the current time.
    pub fn begin_with_id(&mut self, tx_id: impl Into<String>) -> Transaction<'_> {
        self.begin_at(tx_id, TxTimestamp::now())
    }

    /// Start a transaction with a caller-chosen id and timestamp.
    pub fn begin_at(
        &mut self,
        tx_id: impl Into<String>,
        timestamp: TxTimestamp,
    ) -> Transaction<'_> {
        Transaction {
            ledger: self,
            tx_id: tx_id.into(),
            timestamp,
            writes: BTreeMap::new(),
        }
    }

    /// Committed world state, in key order.
    pub fn world_state(&self) -> &BTreeMap<String, Bytes> {
        &self.world
    }

    /// Every recorded modification of `key`, oldest first.
    pub fn history(&self, key: &str) -> &[KeyModification] {
        self.history.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of committed transactions that wrote at least one key.
    pub fn height(&self) -> u64 {
        self.height
    }
}

/// Fresh 64-character hex transaction id.
fn generate_tx_id() -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    format!("{:x}", digest)
}

fn check_key(key: &str) -> Result<(), StateError> {
    if key.is_empty() {
        return Err(StateError::InvalidKey {
            key: key.to_string(),
            message: "key must not be an empty string".to_string(),
        });
    }
    Ok(())
}

/// One invocation's view of an [`InMemoryLedger`].
///
/// Dropping a transaction without committing discards its writes.
pub struct Transaction<'a> {
    ledger: &'a mut InMemoryLedger,
    tx_id: String,
    timestamp: TxTimestamp,
    /// Pending writes; `None` marks a delete.
    writes: BTreeMap<String, Option<Bytes>>,
}

impl Transaction<'_> {
    /// Whether the transaction has buffered any write.
    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    /// Apply buffered writes to the ledger and return the transaction id.
    pub fn commit(self) -> String {
        let Transaction {
            ledger,
            tx_id,
            timestamp,
            writes,
        } = self;

        if writes.is_empty() {
            return tx_id;
        }

        for (key, write) in writes {
            let modification = match write {
                Some(value) => {
                    ledger.world.insert(key.clone(), value.clone());
                    KeyModification {
                        tx_id: tx_id.clone(),
                        timestamp,
                        is_delete: false,
                        value,
                    }
                }
                None => {
                    ledger.world.remove(&key);
                    KeyModification {
                        tx_id: tx_id.clone(),
                        timestamp,
                        is_delete: true,
                        value: Bytes::new(),
                    }
                }
            };
            ledger.history.entry(key).or_default().push(modification);
        }
        ledger.height += 1;

        tracing::debug!(tx_id = %tx_id, height = ledger.height, "committed transaction");
        tx_id
    }
}

#[async_trait]
impl<'a> StateStore for Transaction<'a> {
    async fn get_state(&mut self, key: &str) -> Result<Bytes, StateError> {
        Ok(self.ledger.world.get(key).cloned().unwrap_or_default())
    }

    async fn put_state(&mut self, key: &str, value: Bytes) -> Result<(), StateError> {
        check_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    async fn delete_state(&mut self, key: &str) -> Result<(), StateError> {
        check_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    async fn history_for_key(&mut self, key: &str) -> Result<HistoryIterator, StateError> {
        check_key(key)?;
        let items = self.ledger.history(key).to_vec();
        Ok(Box::new(MemoryIterator::new(items)))
    }

    async fn state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<RangeIterator, StateError> {
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        let lower = Bound::Included(start.to_string());

        if let (Bound::Included(lo), Bound::Excluded(hi)) = (&lower, &upper) {
            if lo > hi {
                return Ok(Box::new(MemoryIterator::new(Vec::new())));
            }
        }

        let items = self
            .ledger
            .world
            .range::<String, _>((lower, upper))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(Box::new(MemoryIterator::new(items)))
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> TxTimestamp {
        self.timestamp
    }
}

/// Cursor over items copied out of the ledger when it was opened.
pub struct MemoryIterator<T> {
    items: std::vec::IntoIter<T>,
    closed: bool,
}

impl<T> MemoryIterator<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl<T: Send> StateIterator for MemoryIterator<T> {
    type Item = T;

    async fn next(&mut self) -> Result<Option<T>, StateError> {
        if self.closed {
            return Err(StateError::Closed);
        }
        Ok(self.items.next())
    }

    fn close(&mut self) {
        if !self.closed {
            tracing::trace!(remaining = self.items.len(), "closing memory iterator");
        }
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(seconds: i64) -> TxTimestamp {
        TxTimestamp::new(seconds, 0)
    }

    #[tokio::test]
    async fn generated_tx_ids_are_64_hex_chars() {
        let mut ledger = InMemoryLedger::new();
        let tx = ledger.begin();
        let id = tx.tx_id().to_string();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn writes_are_invisible_until_commit() {
        let mut ledger = InMemoryLedger::new();

        let mut tx = ledger.begin_with_id("tx1");
        tx.put_state("k", Bytes::from_static(b"v1")).await.unwrap();
        assert!(tx.get_state("k").await.unwrap().is_empty());
        assert!(tx.is_dirty());
        tx.commit();

        let mut tx = ledger.begin_with_id("tx2");
        assert_eq!(tx.get_state("k").await.unwrap(), Bytes::from_static(b"v1"));
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() {
        let mut ledger = InMemoryLedger::new();
        {
            let mut tx = ledger.begin_with_id("tx1");
            tx.put_state("k", Bytes::from_static(b"v1")).await.unwrap();
        }
        assert!(ledger.world_state().is_empty());
        assert_eq!(ledger.height(), 0);
    }

    #[tokio::test]
    async fn delete_keeps_history_with_tombstone() {
        let mut ledger = InMemoryLedger::new();

        let mut tx = ledger.begin_at("tx1", ts(1));
        tx.put_state("k", Bytes::from_static(b"v1")).await.unwrap();
        tx.commit();

        let mut tx = ledger.begin_at("tx2", ts(2));
        tx.delete_state("k").await.unwrap();
        tx.commit();

        assert!(!ledger.world_state().contains_key("k"));

        let mut tx = ledger.begin_at("tx3", ts(3));
        let mut history = tx.history_for_key("k").await.unwrap();

        let first = history.next().await.unwrap().unwrap();
        assert_eq!(first.tx_id, "tx1");
        assert!(!first.is_delete);
        assert_eq!(first.value, Bytes::from_static(b"v1"));

        let second = history.next().await.unwrap().unwrap();
        assert_eq!(second.tx_id, "tx2");
        assert!(second.is_delete);
        assert!(second.value.is_empty());
        assert_eq!(second.timestamp, ts(2));

        assert!(history.next().await.unwrap().is_none());
        history.close();
    }

    #[tokio::test]
    async fn closed_iterator_refuses_next() {
        let mut it = MemoryIterator::new(vec![1, 2, 3]);
        assert_eq!(it.next().await.unwrap(), Some(1));
        it.close();
        assert!(it.is_closed());
        assert!(matches!(it.next().await, Err(StateError::Closed)));
    }

    #[tokio::test]
    async fn range_is_half_open_and_ordered() {
        let mut ledger = InMemoryLedger::new();
        let mut tx = ledger.begin_with_id("tx1");
        for key in ["c", "a", "b", "d"] {
            tx.put_state(key, Bytes::from(key.to_string())).await.unwrap();
        }
        tx.commit();

        let mut tx = ledger.begin_with_id("tx2");
        let mut range = tx.state_by_range("a", "c").await.unwrap();
        let mut keys = Vec::new();
        while let Some(kv) = range.next().await.unwrap() {
            keys.push(kv.key);
        }
        range.close();
        assert_eq!(keys, vec!["a", "b"]);

        let mut open_ended = tx.state_by_range("b", "").await.unwrap();
        let mut keys = Vec::new();
        while let Some(kv) = open_ended.next().await.unwrap() {
            keys.push(kv.key);
        }
        open_ended.close();
        assert_eq!(keys, vec!["b", "c", "d"]);

        let mut inverted = tx.state_by_range("d", "a").await.unwrap();
        assert!(inverted.next().await.unwrap().is_none());
        inverted.close();
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let mut ledger = InMemoryLedger::new();
        let mut tx = ledger.begin_with_id("tx1");
        let result = tx.put_state("", Bytes::from_static(b"v")).await;
        assert!(matches!(result, Err(StateError::InvalidKey { .. })));
    }

    #[tokio::test]
    async fn commit_without_writes_does_not_advance_height() {
        let mut ledger = InMemoryLedger::new();
        let tx = ledger.begin_with_id("read-only");
        assert_eq!(tx.commit(), "read-only");
        assert_eq!(ledger.height(), 0);
    }
}
