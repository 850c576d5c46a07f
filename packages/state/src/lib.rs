//! Ledger state store: the narrow waist between record logic and durable bytes.
//!
//! Everything at this level is keyed bytes. The store knows nothing about
//! donation records, JSON or validity; it only offers the contract a
//! transaction needs:
//!
//! - point reads and buffered writes/deletes against the world state
//! - per-key history cursors and key-range cursors
//! - the current transaction id and its logical timestamp
//!
//! # Read contract
//!
//! `get_state` is tri-state:
//!
//! * `Err(StateError)` - the call itself failed.
//! * `Ok(bytes)` with empty `bytes` - the key is not present.
//! * `Ok(bytes)` otherwise - the stored value (which may be the
//!   [`EMPTY_VALUE_SENTINEL`]).
//!
//! # Example
//!
//! ```rust
//! use donation_ledger_state::{InMemoryLedger, StateStore, Bytes};
//!
//! # tokio_test_block(async {
//! let mut ledger = InMemoryLedger::new();
//! let mut tx = ledger.begin_with_id("tx-1");
//! tx.put_state("k", Bytes::from_static(b"v")).await.unwrap();
//! tx.commit();
//!
//! let mut tx = ledger.begin_with_id("tx-2");
//! assert_eq!(tx.get_state("k").await.unwrap(), Bytes::from_static(b"v"));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```

pub use bytes::Bytes;

mod error;
mod memory;
mod snapshot;
mod traits;
mod types;

pub use error::StateError;
pub use memory::{InMemoryLedger, MemoryIterator, Transaction};
pub use snapshot::Snapshot;
pub use traits::{HistoryIterator, RangeIterator, StateIterator, StateStore};
pub use types::{KeyModification, KeyValue, TxTimestamp};

/// Stored text meaning "key present, value absent".
pub const EMPTY_VALUE_SENTINEL: &str = "undefined";
