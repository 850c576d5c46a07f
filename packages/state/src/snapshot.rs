//! JSON snapshots of an [`InMemoryLedger`].
//!
//! Values are written as text when they are valid UTF-8 (the common case -
//! records are JSON) and as a byte array otherwise.

use std::collections::BTreeMap;
use std::{fs, io, path};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{InMemoryLedger, KeyModification, StateError, TxTimestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Text(String),
    Binary(Vec<u8>),
}

impl From<&Bytes> for StoredValue {
    fn from(bytes: &Bytes) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => StoredValue::Text(text.to_string()),
            Err(_) => StoredValue::Binary(bytes.to_vec()),
        }
    }
}

impl From<StoredValue> for Bytes {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Text(text) => Bytes::from(text),
            StoredValue::Binary(raw) => Bytes::from(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredModification {
    tx_id: String,
    timestamp: TxTimestamp,
    is_delete: bool,
    value: StoredValue,
}

/// Serializable image of a ledger: world state, history and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    height: u64,
    #[serde(default)]
    world: BTreeMap<String, StoredValue>,
    #[serde(default)]
    history: BTreeMap<String, Vec<StoredModification>>,
}

impl Snapshot {
    /// Copy the current contents of `ledger`.
    pub fn capture(ledger: &InMemoryLedger) -> Self {
        let world = ledger
            .world
            .iter()
            .map(|(key, value)| (key.clone(), StoredValue::from(value)))
            .collect();
        let history = ledger
            .history
            .iter()
            .map(|(key, mods)| {
                let mods = mods
                    .iter()
                    .map(|m| StoredModification {
                        tx_id: m.tx_id.clone(),
                        timestamp: m.timestamp,
                        is_delete: m.is_delete,
                        value: StoredValue::from(&m.value),
                    })
                    .collect();
                (key.clone(), mods)
            })
            .collect();

        Self {
            height: ledger.height,
            world,
            history,
        }
    }

    /// Rebuild a ledger from this snapshot.
    pub fn restore(self) -> InMemoryLedger {
        let world = self
            .world
            .into_iter()
            .map(|(key, value)| (key, Bytes::from(value)))
            .collect();
        let history = self
            .history
            .into_iter()
            .map(|(key, mods)| {
                let mods = mods
                    .into_iter()
                    .map(|m| KeyModification {
                        tx_id: m.tx_id,
                        timestamp: m.timestamp,
                        is_delete: m.is_delete,
                        value: Bytes::from(m.value),
                    })
                    .collect();
                (key, mods)
            })
            .collect();

        InMemoryLedger {
            world,
            history,
            height: self.height,
        }
    }

    /// Write the snapshot to `file` as pretty-printed JSON.
    pub fn save(&self, file: &path::Path) -> Result<(), StateError> {
        tracing::debug!(path = %file.display(), "writing ledger snapshot");
        let text = serde_json::to_string_pretty(self)?;
        fs::write(file, text)?;
        Ok(())
    }

    /// Read a snapshot from `file`.
    pub fn load(file: &path::Path) -> Result<Self, StateError> {
        tracing::debug!(path = %file.display(), "reading ledger snapshot");
        let text = fs::read_to_string(file)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the ledger stored at `file`, or start an empty one if the file
    /// does not exist yet.
    pub fn load_ledger(file: &path::Path) -> Result<InMemoryLedger, StateError> {
        match Self::load(file) {
            Ok(snapshot) => Ok(snapshot.restore()),
            Err(StateError::Snapshot(e)) if e.kind() == io::ErrorKind::NotFound => {
                Ok(InMemoryLedger::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateStore;

    async fn populated_ledger() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();

        let mut tx = ledger.begin_at("tx1", TxTimestamp::new(10, 5));
        tx.put_state("text", Bytes::from_static(b"{\"a\":1}"))
            .await
            .unwrap();
        tx.put_state("binary", Bytes::from_static(&[0xff, 0x00, 0xfe]))
            .await
            .unwrap();
        tx.commit();

        let mut tx = ledger.begin_at("tx2", TxTimestamp::new(11, 0));
        tx.delete_state("binary").await.unwrap();
        tx.commit();

        ledger
    }

    #[tokio::test]
    async fn capture_restore_preserves_everything() {
        let ledger = populated_ledger().await;
        let restored = Snapshot::capture(&ledger).restore();

        assert_eq!(restored.world_state(), ledger.world_state());
        assert_eq!(restored.history("binary"), ledger.history("binary"));
        assert_eq!(restored.history("text"), ledger.history("text"));
        assert_eq!(restored.height(), 2);
    }

    #[tokio::test]
    async fn save_and_load_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ledger.json");

        let ledger = populated_ledger().await;
        Snapshot::capture(&ledger).save(&file).unwrap();

        let loaded = Snapshot::load_ledger(&file).unwrap();
        assert_eq!(loaded.world_state(), ledger.world_state());
        assert_eq!(loaded.history("binary").len(), 2);
        assert!(loaded.history("binary")[1].is_delete);
    }

    #[test]
    fn missing_file_yields_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Snapshot::load_ledger(&dir.path().join("absent.json")).unwrap();
        assert!(ledger.world_state().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ledger.json");
        fs::write(&file, "not json").unwrap();
        assert!(matches!(
            Snapshot::load_ledger(&file),
            Err(StateError::Json(_))
        ));
    }
}
