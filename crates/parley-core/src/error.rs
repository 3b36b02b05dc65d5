use parley_db::StoreError;
use parley_util::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid chat '{0}', should be in the format of user1:user2")]
    InvalidConversationFormat(String),
    #[error("sender '{0}' is not in the chat room")]
    SenderNotInConversation(String),
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ValidationError> for CoreError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidConversationFormat(chat) => {
                CoreError::InvalidConversationFormat(chat)
            }
            ValidationError::SenderNotInConversation(sender) => {
                CoreError::SenderNotInConversation(sender)
            }
            ValidationError::InvalidPageRequest(msg) => CoreError::InvalidPageRequest(msg),
        }
    }
}
