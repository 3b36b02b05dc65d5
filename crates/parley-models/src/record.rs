use serde::{Deserialize, Serialize};

/// The payload persisted for every accepted message.
///
/// Serialized as compact JSON with the field names `sender`, `message` and
/// `timestamp`. Records are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub sender: String,
    pub message: String,
    /// Unix seconds; also used as the ordering score.
    pub timestamp: i64,
}

impl MessageRecord {
    pub fn new(sender: impl Into<String>, message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
            timestamp,
        }
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}
