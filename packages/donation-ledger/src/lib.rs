//! donation-ledger: a registry of donation records kept in a ledger state store.
//!
//! Every record is stored under the id of the transaction that created it,
//! is checked against a fixed set of projects and item types, and keeps a
//! full modification history in the store. Invalid content is recorded and
//! flagged through `validity`, never rejected.
//!
//! The crate is layered; this facade re-exports each layer:
//!
//! - [`state`]: the state-store contract and an in-memory ledger
//! - [`record`]: the record model, validation rules and codec
//! - [`service`]: record operations and history aggregation
//! - [`dispatch`]: routing of named invocations to operations
//!
//! # Example
//!
//! ```rust
//! use donation_ledger::{Dispatcher, InMemoryLedger};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let dispatcher = Dispatcher::default();
//! let mut ledger = InMemoryLedger::new();
//!
//! let mut tx = ledger.begin();
//! let args = vec!["ILO".to_string(), "tents".to_string(), "5".to_string()];
//! let response = dispatcher.invoke(&mut tx, "addDonation", &args).await;
//! let key = tx.commit();
//!
//! let created: serde_json::Value = response.payload_as().unwrap();
//! assert_eq!(created["key"], key);
//! # });
//! ```

pub use donation_ledger_dispatch as dispatch;
pub use donation_ledger_record as record;
pub use donation_ledger_service as service;
pub use donation_ledger_state as state;

pub use donation_ledger_dispatch::{DispatchError, Dispatcher, Operation, Response, Status};
pub use donation_ledger_record::{
    Amount, DomainConfig, DonationRecord, Error, ErrorKind, RecordCodec, UpdatePairs, Validator,
};
pub use donation_ledger_service::{HistoryEntry, RangeEntry, RecordService};
pub use donation_ledger_state::{
    InMemoryLedger, Snapshot, StateError, StateIterator, StateStore, TxTimestamp,
};
