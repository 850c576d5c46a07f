//! The envelope handed back to the caller of one invocation.

use bytes::Bytes;
use donation_ledger_service::aggregate::parse_or_text;
use serde::de::DeserializeOwned;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Outcome code of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Error => 500,
        }
    }
}

/// Response envelope.
///
/// A success carries the serialized result and an empty message; a failure
/// carries the error message and an empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub message: String,
    pub payload: Bytes,
}

impl Response {
    pub fn success(payload: Bytes) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: Bytes::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Deserialize the payload.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// Serializes as `{"status": 200, "message": "", "payload": <json>}`. The
/// payload is inlined as JSON when it parses, as text otherwise, and `null`
/// when empty.
impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = if self.payload.is_empty() {
            serde_json::Value::Null
        } else {
            parse_or_text(&self.payload)
        };
        let mut s = serializer.serialize_struct("Response", 3)?;
        s.serialize_field("status", &self.status.code())?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("payload", &payload)?;
        s.end()
    }
}
