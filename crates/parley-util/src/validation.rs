use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid chat '{0}', should be in the format of user1:user2")]
    InvalidConversationFormat(String),
    #[error("sender '{0}' is not in the chat room")]
    SenderNotInConversation(String),
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
}

/// Split a chat reference into its two participants.
///
/// The split is case-sensitive and both segments must be non-empty.
pub fn split_conversation(chat: &str) -> Result<(&str, &str), ValidationError> {
    let mut parts = chat.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
            Ok((first, second))
        }
        _ => Err(ValidationError::InvalidConversationFormat(chat.to_string())),
    }
}

/// Check that `chat` names exactly two participants and that `sender` is one
/// of them, comparing case-sensitively.
pub fn validate_send(chat: &str, sender: &str) -> Result<(), ValidationError> {
    let (first, second) = split_conversation(chat)?;
    if sender != first && sender != second {
        return Err(ValidationError::SenderNotInConversation(sender.to_string()));
    }
    Ok(())
}
