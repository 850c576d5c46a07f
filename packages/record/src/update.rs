//! Partial-update requests.

use std::collections::BTreeMap;

use crate::record::{Amount, DonationRecord, FIELD_AMOUNT, FIELD_ITEM_TYPE, FIELD_PROJECT};
use crate::{Error, Validator};

/// Field/value pairs decoded from a keys-then-values argument vector.
///
/// Every supplied pair is kept, but only `project`, `itemType` and `amount`
/// take part in [`merge_into`](UpdatePairs::merge_into). A field whose value
/// is the empty string is treated as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePairs {
    fields: BTreeMap<String, String>,
}

impl UpdatePairs {
    /// Decode `[k1, .., kn, v1, .., vn]` into `{k1: v1, .., kn: vn}`.
    ///
    /// Fails on an odd-length vector. A repeated key keeps its last value.
    pub fn decode<S: AsRef<str>>(args: &[S]) -> Result<Self, Error> {
        Validator::require_even_count(args.len())?;

        let (keys, values) = args.split_at(args.len() / 2);
        let fields = keys
            .iter()
            .zip(values)
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value supplied for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Supplied fields that no merge will ever apply.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|k| ![FIELD_PROJECT, FIELD_ITEM_TYPE, FIELD_AMOUNT].contains(k))
    }

    fn supplied(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    /// Overwrite the recognized, non-empty fields of `record`.
    ///
    /// Returns the names of the fields that were applied. Derived fields
    /// (`timestamp`, `validity`) are left for the caller to recompute.
    pub fn merge_into(&self, record: &mut DonationRecord) -> Vec<&'static str> {
        let mut applied = Vec::new();
        if let Some(project) = self.supplied(FIELD_PROJECT) {
            record.project = project.to_string();
            applied.push(FIELD_PROJECT);
        }
        if let Some(item_type) = self.supplied(FIELD_ITEM_TYPE) {
            record.item_type = item_type.to_string();
            applied.push(FIELD_ITEM_TYPE);
        }
        if let Some(amount) = self.supplied(FIELD_AMOUNT) {
            record.amount = Amount::from(amount);
            applied.push(FIELD_AMOUNT);
        }
        applied
    }
}
