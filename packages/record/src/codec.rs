//! JSON codec for records, response payloads and argument vectors.

use bytes::Bytes;
use donation_ledger_state::{TxTimestamp, EMPTY_VALUE_SENTINEL};
use serde::Serialize;

use crate::record::{Amount, DonationRecord};
use crate::{Error, UpdatePairs, Validator};

/// Converts between argument vectors, records and stored bytes.
///
/// # Example
///
/// ```rust
/// use donation_ledger_record::RecordCodec;
///
/// // The store's "present but empty" marker decodes to no record.
/// assert_eq!(RecordCodec::decode(b"undefined").unwrap(), None);
///
/// // Anything else must be a well-formed record.
/// assert!(RecordCodec::decode(b"{not json").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordCodec;

impl RecordCodec {
    /// Serialize any payload (records, operation results) to JSON bytes.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, Error> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(Error::Encode)
    }

    /// Parse stored bytes into a record.
    ///
    /// * `Ok(None)` - the bytes are the empty-value sentinel.
    /// * `Ok(Some(record))` - a well-formed record.
    /// * `Err(Error::Decode)` - anything else.
    pub fn decode(bytes: &[u8]) -> Result<Option<DonationRecord>, Error> {
        if bytes == EMPTY_VALUE_SENTINEL.as_bytes() {
            return Ok(None);
        }
        serde_json::from_slice(bytes)
            .map(Some)
            .map_err(|e| Error::Decode {
                text: String::from_utf8_lossy(bytes).into_owned(),
                message: e.to_string(),
            })
    }

    /// Build a new record from `[project, itemType, amount]`.
    ///
    /// `timestamp` and `validity` are supplied by the caller; the amount is
    /// stored in numeric form when it parses as one.
    pub fn from_create_args<S: AsRef<str>>(
        args: &[S],
        timestamp: TxTimestamp,
        validity: bool,
    ) -> Result<DonationRecord, Error> {
        Validator::check_exact_arity(args, 3)?;
        Ok(DonationRecord {
            project: args[0].as_ref().to_string(),
            item_type: args[1].as_ref().to_string(),
            amount: Amount::parse_numeric(args[2].as_ref()),
            timestamp,
            validity,
        })
    }

    /// Decode a keys-then-values update vector.
    pub fn from_update_pairs<S: AsRef<str>>(args: &[S]) -> Result<UpdatePairs, Error> {
        UpdatePairs::decode(args)
    }
}
