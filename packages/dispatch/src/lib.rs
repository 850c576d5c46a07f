//! Invocation dispatch for the donation ledger.
//!
//! The surrounding bootstrap decodes each call into a function name and a
//! string argument vector, opens a store for the transaction, and hands both
//! to a [`Dispatcher`]. What comes back is always a [`Response`]:
//!
//! * status 200 with the serialized operation result as payload, or
//! * status 500 with the error message and no payload.
//!
//! # Example
//!
//! ```rust
//! use donation_ledger_dispatch::Dispatcher;
//! use donation_ledger_state::InMemoryLedger;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let dispatcher = Dispatcher::default();
//! let mut ledger = InMemoryLedger::new();
//!
//! let mut tx = ledger.begin();
//! let args = vec!["WHO".to_string(), "medicine".to_string(), "12".to_string()];
//! let response = dispatcher.invoke(&mut tx, "addDonation", &args).await;
//! assert!(response.is_ok());
//! tx.commit();
//!
//! let mut tx = ledger.begin();
//! let response = dispatcher.invoke(&mut tx, "deleteEverything", &[]).await;
//! assert_eq!(response.message, "method not found");
//! # });
//! ```

mod dispatcher;
mod error;
mod operation;
mod response;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use operation::Operation;
pub use response::{Response, Status};
