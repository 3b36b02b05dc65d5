pub mod clock;
pub mod conversation;
pub mod error;

use std::sync::Arc;

use parley_db::MessageStore;

pub use clock::{Clock, FixedClock, SystemClock};
pub use conversation::ConversationService;

#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConversationService<MessageStore>>,
}

impl AppState {
    pub fn new(store: MessageStore) -> Self {
        Self {
            conversations: Arc::new(ConversationService::new(store)),
        }
    }

    pub fn with_clock(store: MessageStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            conversations: Arc::new(ConversationService::with_clock(store, clock)),
        }
    }
}
