//! Donation records: the data model and the rules around it.
//!
//! This layer gives meaning to the bytes of the state layer:
//! - `DonationRecord`: the persisted entity and its JSON form
//! - `Validator`: argument-shape checks and domain predicates
//! - `RecordCodec`: argument vectors and stored bytes to records and back
//! - `UpdatePairs`: the keys-then-values layout of partial updates
//!
//! Nothing here talks to a store; every function is pure apart from logging.
//!
//! # Example
//!
//! ```rust
//! use donation_ledger_record::{RecordCodec, Validator, TxTimestamp};
//!
//! let validator = Validator::default();
//! let args = ["FAO".to_string(), "water".to_string(), "3.2".to_string()];
//!
//! let validity = validator.compute_validity(&args[0], &args[1], &args[2]);
//! let record = RecordCodec::from_create_args(&args, TxTimestamp::new(1, 0), validity).unwrap();
//!
//! let bytes = RecordCodec::encode(&record).unwrap();
//! assert_eq!(RecordCodec::decode(&bytes).unwrap(), Some(record));
//! ```

pub use bytes::Bytes;

mod codec;
mod config;
mod error;
mod record;
mod update;
mod validator;

pub use codec::RecordCodec;
pub use config::{ConfigError, DomainConfig};
pub use error::{Error, ErrorKind, StoreAction};
pub use record::{Amount, DonationRecord, FIELD_AMOUNT, FIELD_ITEM_TYPE, FIELD_PROJECT};
pub use update::UpdatePairs;
pub use validator::Validator;

// Re-export state types that appear in this layer's API
pub use donation_ledger_state::{StateError, TxTimestamp, EMPTY_VALUE_SENTINEL};
