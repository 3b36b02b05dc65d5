use std::fmt;

use crate::validation::{split_conversation, ValidationError};

/// Canonical storage partition for a two-party conversation.
///
/// Both participants are lower-cased and ordered, so `"Bob:alice"` and
/// `"alice:BOB"` resolve to the same key `"alice:bob"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn derive(chat: &str) -> Result<Self, ValidationError> {
        let lowered = chat.to_lowercase();
        let (first, second) = split_conversation(&lowered)
            .map_err(|_| ValidationError::InvalidConversationFormat(chat.to_string()))?;
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self(format!("{low}:{high}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn participants(&self) -> (&str, &str) {
        // Always two segments; enforced by `derive`.
        self.0.split_once(':').unwrap_or((self.0.as_str(), ""))
    }
}

impl AsRef<str> for RoomKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_of_participants_does_not_matter() {
        let ab = RoomKey::derive("alice:bob").unwrap();
        let ba = RoomKey::derive("bob:alice").unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.as_str(), "alice:bob");
        assert_eq!(ab.participants(), ("alice", "bob"));
    }

    #[test]
    fn case_is_normalized() {
        assert_eq!(
            RoomKey::derive("A:b").unwrap(),
            RoomKey::derive("a:B").unwrap()
        );
        assert_eq!(RoomKey::derive("Sam:JOHN").unwrap().to_string(), "john:sam");
    }

    #[test]
    fn same_participant_twice_is_a_valid_room() {
        assert_eq!(RoomKey::derive("me:ME").unwrap().as_str(), "me:me");
    }

    #[test]
    fn malformed_references_are_rejected() {
        for chat in ["a", "a:b:c", "", "a:", ":b"] {
            assert_eq!(
                RoomKey::derive(chat),
                Err(ValidationError::InvalidConversationFormat(chat.to_string()))
            );
        }
    }
}
