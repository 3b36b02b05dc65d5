use std::sync::Arc;

use parley_db::{OrderedMessageStore, StoreError};
use parley_models::message::Message;
use parley_models::record::MessageRecord;
use parley_util::pagination::{CursorPage, PageWindow};
use parley_util::room::RoomKey;
use parley_util::validation;

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;

/// Send and pull for two-party conversations.
///
/// Holds no mutable state of its own; every call is a single insert or a
/// single range read against the store.
pub struct ConversationService<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: OrderedMessageStore> ConversationService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a message. Returns the stored record.
    pub async fn send(
        &self,
        chat: &str,
        text: &str,
        sender: &str,
    ) -> Result<MessageRecord, CoreError> {
        if let Err(e) = validation::validate_send(chat, sender) {
            tracing::warn!(chat, sender, "send rejected: {e}");
            return Err(e.into());
        }
        let room = RoomKey::derive(chat)?;

        let record = MessageRecord::new(sender, text, self.clock.now_unix());
        let payload = record.to_payload().map_err(StoreError::from)?;
        self.store
            .insert(room.as_str(), record.timestamp, payload)
            .await?;

        tracing::debug!(room = %room, sender, timestamp = record.timestamp, "message stored");
        Ok(record)
    }

    /// Read one page of a conversation starting at position `cursor`.
    ///
    /// `limit = 0` means the default page size. When another page exists,
    /// `next_cursor` is the end of the window just read, so the next page
    /// starts on the last position requested here.
    pub async fn pull(
        &self,
        chat: &str,
        cursor: i64,
        limit: i32,
        reverse: bool,
    ) -> Result<CursorPage<Message>, CoreError> {
        let room = RoomKey::derive(chat).inspect_err(|e| {
            tracing::warn!(chat, "pull rejected: {e}");
        })?;
        let window = PageWindow::new(cursor, limit)?;

        let raw = self
            .store
            .range(room.as_str(), window.start, window.end, reverse)
            .await?;
        let records = raw
            .iter()
            .map(|payload| MessageRecord::from_payload(payload))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        let page = window.paginate(records).map(|record| Message {
            chat: chat.to_string(),
            text: record.message,
            sender: record.sender,
            send_time: record.timestamp,
        });

        tracing::debug!(
            room = %room,
            start = window.start,
            end = window.end,
            reverse,
            returned = page.items.len(),
            has_more = page.has_more,
            "page read"
        );
        Ok(page)
    }
}
