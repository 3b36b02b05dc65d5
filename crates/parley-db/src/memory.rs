use std::sync::Arc;

use dashmap::DashMap;

use crate::store::{range_len, OrderedMessageStore};
use crate::StoreError;

#[derive(Debug, Clone)]
struct Entry {
    score: i64,
    payload: Vec<u8>,
}

/// In-process ordered store. Each room is a vector kept sorted by score;
/// nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryMessageStore {
    rooms: Arc<DashMap<String, Vec<Entry>>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_len(&self, room_key: &str) -> usize {
        self.rooms.get(room_key).map(|room| room.len()).unwrap_or(0)
    }

    fn collect<'a>(
        entries: impl Iterator<Item = &'a Entry>,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        let Some(count) = range_len(start, end)? else {
            return Ok(Vec::new());
        };
        let skip = usize::try_from(start).unwrap_or(usize::MAX);
        let take = usize::try_from(count).unwrap_or(usize::MAX);
        Ok(entries
            .skip(skip)
            .take(take)
            .map(|entry| entry.payload.clone())
            .collect())
    }
}

impl OrderedMessageStore for MemoryMessageStore {
    async fn insert(&self, room_key: &str, score: i64, payload: Vec<u8>) -> Result<(), StoreError> {
        let mut room = self.rooms.entry(room_key.to_string()).or_default();
        // After every entry with an equal score, so ties keep insertion order.
        let position = room.partition_point(|entry| entry.score <= score);
        room.insert(position, Entry { score, payload });
        Ok(())
    }

    async fn range_ascending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        match self.rooms.get(room_key) {
            Some(room) => Self::collect(room.iter(), start, end),
            None => Self::collect(std::iter::empty(), start, end),
        }
    }

    async fn range_descending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        match self.rooms.get(room_key) {
            Some(room) => Self::collect(room.iter().rev(), start, end),
            None => Self::collect(std::iter::empty(), start, end),
        }
    }
}
