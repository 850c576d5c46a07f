//! The persisted donation entity.

use std::borrow::Cow;

use donation_ledger_state::TxTimestamp;
use serde::{Deserialize, Serialize};

pub const FIELD_PROJECT: &str = "project";
pub const FIELD_ITEM_TYPE: &str = "itemType";
pub const FIELD_AMOUNT: &str = "amount";

/// A donation as stored under its creating transaction's id.
///
/// The key is not part of the body. `validity` is derived from the three
/// content fields and `timestamp` comes from the store, never the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub project: String,
    pub item_type: String,
    pub amount: Amount,
    pub timestamp: TxTimestamp,
    pub validity: bool,
}

/// A donated amount, kept in the form it arrived in.
///
/// Creation stores the numeric form when the text parses; updates store the
/// text exactly as supplied. Both read back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Numeric form of `text` if it has one, otherwise the text itself.
    ///
    /// Integers stay integers; anything that is not a finite number is kept
    /// as text so the original input is not lost.
    pub fn parse_numeric(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Amount::Number(int.into());
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Amount::Number)
            .unwrap_or_else(|| Amount::Text(text.to_string()))
    }

    /// Text form, as it would be displayed.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Amount::Number(n) => Cow::Owned(n.to_string()),
            Amount::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Amount::Text(_))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Amount {
    fn from(text: &str) -> Self {
        Amount::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_uses_wire_field_names() {
        let record = DonationRecord {
            project: "FAO".to_string(),
            item_type: "water".to_string(),
            amount: Amount::parse_numeric("3.2"),
            timestamp: TxTimestamp::new(7, 8),
            validity: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "project": "FAO",
                "itemType": "water",
                "amount": 3.2,
                "timestamp": {"seconds": 7, "nanos": 8},
                "validity": true
            })
        );
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(Amount::parse_numeric("22"), Amount::Number(22.into()));
        assert_eq!(Amount::parse_numeric(" 22 ").to_string(), "22");
    }

    #[test]
    fn non_numbers_are_kept_verbatim() {
        assert_eq!(Amount::parse_numeric("lots"), Amount::Text("lots".to_string()));
        assert_eq!(
            Amount::parse_numeric("inf"),
            Amount::Text("inf".to_string())
        );
    }

    #[test]
    fn text_amount_reads_back_as_string() {
        let amount: Amount = serde_json::from_value(json!("22")).unwrap();
        assert_eq!(amount, Amount::Text("22".to_string()));

        let amount: Amount = serde_json::from_value(json!(22)).unwrap();
        assert_eq!(amount, Amount::Number(22.into()));
    }
}
