//! Core traits for the state layer.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{KeyModification, KeyValue, StateError, TxTimestamp};

/// Cursor over the history of a single key.
pub type HistoryIterator = Box<dyn StateIterator<Item = KeyModification>>;

/// Cursor over a key range of the world state.
pub type RangeIterator = Box<dyn StateIterator<Item = KeyValue>>;

/// Forward-only cursor handed out by the store.
///
/// Cursors hold store-side resources. Whoever drains one must call
/// [`close`](StateIterator::close) exactly once when done; after that,
/// `next` fails with [`StateError::Closed`].
#[async_trait]
pub trait StateIterator: Send {
    type Item: Send;

    /// Fetch the next item.
    ///
    /// * `Ok(Some(item))` - another item.
    /// * `Ok(None)` - the cursor is exhausted.
    /// * `Err(StateError)` - the store failed or the cursor was closed.
    async fn next(&mut self) -> Result<Option<Self::Item>, StateError>;

    /// Release the store-side cursor.
    fn close(&mut self);
}

/// The state store as seen from inside one transaction.
///
/// An implementation is bound to a single invocation: `tx_id` and
/// `tx_timestamp` stay fixed for its whole lifetime.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn StateStore`.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(bytes)` - empty when the key is not present.
    /// * `Err(StateError)` - the call itself failed.
    async fn get_state(&mut self, key: &str) -> Result<Bytes, StateError>;

    /// Write `value` under `key`.
    async fn put_state(&mut self, key: &str, value: Bytes) -> Result<(), StateError>;

    /// Remove `key` from the world state. Its history stays queryable.
    async fn delete_state(&mut self, key: &str) -> Result<(), StateError>;

    /// Open a cursor over every modification of `key`, oldest first.
    async fn history_for_key(&mut self, key: &str) -> Result<HistoryIterator, StateError>;

    /// Open a cursor over keys in `[start, end)`, in key order.
    ///
    /// An empty `end` leaves the range unbounded above.
    async fn state_by_range(&mut self, start: &str, end: &str)
        -> Result<RangeIterator, StateError>;

    /// Identifier of the current transaction.
    fn tx_id(&self) -> &str;

    /// Logical timestamp of the current transaction.
    fn tx_timestamp(&self) -> TxTimestamp;
}

// Blanket implementations for references and boxes

#[async_trait]
impl<T: StateIterator + ?Sized> StateIterator for Box<T> {
    type Item = T::Item;

    async fn next(&mut self) -> Result<Option<Self::Item>, StateError> {
        self.as_mut().next().await
    }

    fn close(&mut self) {
        self.as_mut().close()
    }
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for &mut T {
    async fn get_state(&mut self, key: &str) -> Result<Bytes, StateError> {
        (**self).get_state(key).await
    }

    async fn put_state(&mut self, key: &str, value: Bytes) -> Result<(), StateError> {
        (**self).put_state(key, value).await
    }

    async fn delete_state(&mut self, key: &str) -> Result<(), StateError> {
        (**self).delete_state(key).await
    }

    async fn history_for_key(&mut self, key: &str) -> Result<HistoryIterator, StateError> {
        (**self).history_for_key(key).await
    }

    async fn state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<RangeIterator, StateError> {
        (**self).state_by_range(start, end).await
    }

    fn tx_id(&self) -> &str {
        (**self).tx_id()
    }

    fn tx_timestamp(&self) -> TxTimestamp {
        (**self).tx_timestamp()
    }
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Box<T> {
    async fn get_state(&mut self, key: &str) -> Result<Bytes, StateError> {
        self.as_mut().get_state(key).await
    }

    async fn put_state(&mut self, key: &str, value: Bytes) -> Result<(), StateError> {
        self.as_mut().put_state(key, value).await
    }

    async fn delete_state(&mut self, key: &str) -> Result<(), StateError> {
        self.as_mut().delete_state(key).await
    }

    async fn history_for_key(&mut self, key: &str) -> Result<HistoryIterator, StateError> {
        self.as_mut().history_for_key(key).await
    }

    async fn state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<RangeIterator, StateError> {
        self.as_mut().state_by_range(start, end).await
    }

    fn tx_id(&self) -> &str {
        self.as_ref().tx_id()
    }

    fn tx_timestamp(&self) -> TxTimestamp {
        self.as_ref().tx_timestamp()
    }
}
