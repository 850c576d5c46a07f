//! Record operations over a ledger state store.
//!
//! This layer maps business operations onto store calls:
//! - `RecordService`: create, read, readMany, exists, history, update,
//!   delete and range reads, each taking one invocation's argument vector
//! - `aggregate`: drains history and range cursors into result entries,
//!   closing the cursor on every exit path
//!
//! Operations borrow the store for the length of one call and keep nothing
//! between calls.
//!
//! # Example
//!
//! ```rust
//! use donation_ledger_service::RecordService;
//! use donation_ledger_state::InMemoryLedger;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let service = RecordService::default();
//! let mut ledger = InMemoryLedger::new();
//!
//! let mut tx = ledger.begin();
//! let args = vec!["FAO".to_string(), "water".to_string(), "3.2".to_string()];
//! let created = service.create(&mut tx, &args).await.unwrap();
//! tx.commit();
//!
//! let mut tx = ledger.begin();
//! let read = service.read(&mut tx, &[created.key]).await.unwrap();
//! assert!(read.value.unwrap().validity);
//! # });
//! ```

pub mod aggregate;
mod results;
mod service;

pub use aggregate::{HistoryEntry, RangeEntry, ScopedCursor};
pub use results::{Created, Deleted, Exists, ReadMany, ReadRecord, Updated};
pub use service::RecordService;

// Re-export the record layer types that appear in this layer's API
pub use donation_ledger_record::{DonationRecord, Error, ErrorKind, Validator};
