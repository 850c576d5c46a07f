//! Result shapes returned by [`RecordService`](crate::RecordService).

use donation_ledger_record::DonationRecord;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Result of a create: the key the record was stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub key: String,
}

/// Result of a read. `value` is `None` when the key is missing or holds the
/// empty-value sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadRecord {
    pub key: String,
    pub value: Option<DonationRecord>,
}

/// Result of a batch read: one [`ReadRecord`] per requested key, in request
/// order. Serializes as a JSON object keyed by record key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadMany {
    entries: Vec<ReadRecord>,
}

impl ReadMany {
    pub(crate) fn push(&mut self, entry: ReadRecord) {
        self.entries.push(entry);
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ReadRecord> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadRecord> {
        self.entries.iter()
    }
}

impl Serialize for ReadMany {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, entry)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exists {
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Updated {
    pub key: String,
    pub update_transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub key: String,
    pub delete_transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_many_serializes_in_request_order() {
        let mut many = ReadMany::default();
        for key in ["zz", "aa"] {
            many.push(ReadRecord {
                key: key.to_string(),
                value: None,
            });
        }
        let text = serde_json::to_string(&many).unwrap();
        assert_eq!(
            text,
            r#"{"zz":{"key":"zz","value":null},"aa":{"key":"aa","value":null}}"#
        );
    }

    #[test]
    fn transaction_ids_use_camel_case() {
        let updated = Updated {
            key: "k".to_string(),
            update_transaction_id: "t".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({"key": "k", "updateTransactionId": "t"})
        );
        let deleted = Deleted {
            key: "k".to_string(),
            delete_transaction_id: "t".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&deleted).unwrap(),
            json!({"key": "k", "deleteTransactionId": "t"})
        );
    }
}
