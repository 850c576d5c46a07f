//! Business operations on donation records.

use donation_ledger_record::{
    DonationRecord, Error, RecordCodec, StoreAction, UpdatePairs, Validator,
};
use donation_ledger_state::StateStore;
use serde_json::Value as JsonValue;

use crate::aggregate::{self, HistoryEntry, RangeEntry};
use crate::results::{Created, Deleted, Exists, ReadMany, ReadRecord, Updated};

/// Maps record operations onto store calls.
///
/// The service keeps no state of its own between calls: every operation
/// round-trips through the store it is handed. Each operation receives the
/// raw argument vector of one invocation.
#[derive(Debug, Clone, Default)]
pub struct RecordService {
    validator: Validator,
}

impl RecordService {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Store a new record under the current transaction id.
    ///
    /// Args: `[project, itemType, amount]`.
    pub async fn create(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Created, Error> {
        Validator::check_exact_arity(args, 3)?;

        let key = store.tx_id().to_string();
        let validity = self
            .validator
            .compute_validity(&args[0], &args[1], &args[2]);
        let record = RecordCodec::from_create_args(args, store.tx_timestamp(), validity)?;
        let bytes = RecordCodec::encode(&record)?;

        store
            .put_state(&key, bytes)
            .await
            .map_err(|e| Error::from(e).in_store(StoreAction::Create, &key))?;

        tracing::info!(key = %key, validity, "created donation");
        Ok(Created { key })
    }

    /// Read one record. Args: `[key]`.
    pub async fn read(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<ReadRecord, Error> {
        Validator::check_exact_arity(args, 1)?;
        self.read_key(store, &args[0]).await
    }

    /// Read several records, one store call per key, in request order.
    ///
    /// Keys are passed positionally, or as a single argument holding a JSON
    /// array of keys. A key requested twice appears once.
    pub async fn read_many(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<ReadMany, Error> {
        let keys = requested_keys(args)?;
        for key in &keys {
            self.validator.check_key(key)?;
        }

        let mut result = ReadMany::default();
        for key in &keys {
            if result.contains(key) {
                continue;
            }
            result.push(self.read_key(store, key).await?);
        }
        Ok(result)
    }

    /// Whether a key holds a value. Args: `[key]`.
    pub async fn exists(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Exists, Error> {
        Validator::check_exact_arity(args, 1)?;
        self.validator.check_key(&args[0])?;

        let raw = Validator::require_retrieved(store.get_state(&args[0]).await)?;
        Ok(Exists {
            exists: !raw.is_empty(),
        })
    }

    /// Every modification of a key, oldest first. Args: `[key]`.
    pub async fn history(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Vec<HistoryEntry>, Error> {
        Validator::check_exact_arity(args, 1)?;
        self.validator.check_key(&args[0])?;

        let cursor = store.history_for_key(&args[0]).await?;
        Ok(aggregate::collect(cursor).await?)
    }

    /// Current records with keys in `[start, end)`. Args: `[start, end]`.
    pub async fn read_range(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Vec<RangeEntry>, Error> {
        Validator::check_exact_arity(args, 2)?;

        let cursor = store.state_by_range(&args[0], &args[1]).await?;
        Ok(aggregate::collect(cursor).await?)
    }

    /// Overwrite some fields of an existing record.
    ///
    /// Args: `[key, field1, .., fieldN, value1, .., valueN]` with N in 1..=3.
    /// Timestamp and validity are recomputed from the merged record.
    pub async fn update(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Updated, Error> {
        let key = args.first().map(String::as_str).unwrap_or_default();
        self.validator.check_key(key)?;
        Validator::check_arity_in_range(args, 3, 7)?;
        let pairs = RecordCodec::from_update_pairs(&args[1..])?;

        self.merge_and_store(store, key, &pairs)
            .await
            .map_err(|e| e.in_store(StoreAction::Update, key))?;

        Ok(Updated {
            key: key.to_string(),
            update_transaction_id: store.tx_id().to_string(),
        })
    }

    /// Remove a record from the world state. Args: `[key]`.
    pub async fn delete(
        &self,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Deleted, Error> {
        Validator::check_exact_arity(args, 1)?;
        let key = args[0].as_str();
        self.validator.check_key(key)?;

        remove_existing(store, key)
            .await
            .map_err(|e| e.in_store(StoreAction::Delete, key))?;

        tracing::info!(key = %key, "deleted donation");
        Ok(Deleted {
            key: key.to_string(),
            delete_transaction_id: store.tx_id().to_string(),
        })
    }

    async fn read_key(&self, store: &mut dyn StateStore, key: &str) -> Result<ReadRecord, Error> {
        self.validator.check_key(key)?;

        let raw = Validator::require_retrieved(store.get_state(key).await)?;
        let value = if raw.is_empty() {
            None
        } else {
            RecordCodec::decode(&raw)?
        };
        Ok(ReadRecord {
            key: key.to_string(),
            value,
        })
    }

    async fn merge_and_store(
        &self,
        store: &mut dyn StateStore,
        key: &str,
        pairs: &UpdatePairs,
    ) -> Result<(), Error> {
        let raw = Validator::require_retrieved(store.get_state(key).await)?;
        Validator::require_existing_record(&raw)?;
        let mut record: DonationRecord = RecordCodec::decode(&raw)?.ok_or(Error::NotFound)?;

        let applied = pairs.merge_into(&mut record);
        for field in pairs.unrecognized() {
            tracing::debug!(key = %key, field, "ignoring unrecognized update field");
        }

        record.timestamp = store.tx_timestamp();
        record.validity = self.validator.compute_validity(
            &record.project,
            &record.item_type,
            &record.amount.as_text(),
        );

        store.put_state(key, RecordCodec::encode(&record)?).await?;
        tracing::info!(key = %key, ?applied, validity = record.validity, "updated donation");
        Ok(())
    }
}

async fn remove_existing(store: &mut dyn StateStore, key: &str) -> Result<(), Error> {
    let raw = Validator::require_retrieved(store.get_state(key).await)?;
    Validator::require_existing_record(&raw)?;
    store.delete_state(key).await?;
    Ok(())
}

/// Keys of a batch read, either positional or a JSON array in one argument.
fn requested_keys(args: &[String]) -> Result<Vec<String>, Error> {
    match args {
        [single] if single.trim_start().starts_with('[') => {
            let value: JsonValue = serde_json::from_str(single).map_err(|e| Error::Decode {
                text: single.clone(),
                message: e.to_string(),
            })?;
            Validator::require_array(&value)?
                .iter()
                .map(|element| match element {
                    JsonValue::String(key) => Ok(key.clone()),
                    other => Err(Error::Type {
                        expected: "string",
                        found: other.to_string(),
                    }),
                })
                .collect()
        }
        _ => Ok(args.to_vec()),
    }
}
