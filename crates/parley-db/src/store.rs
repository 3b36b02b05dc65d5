//! The ordered message store contract.
//!
//! A store keeps, per room key, a sequence of opaque payloads ordered by a
//! numeric score. Entries with equal scores keep their insertion order.
//! Ranges are inclusive position ranges `[start, end]`: a range past the end
//! of the room is truncated and `start > end` yields nothing.

use std::future::Future;

use crate::{MemoryMessageStore, SqlMessageStore, StoreError};

pub trait OrderedMessageStore: Send + Sync {
    fn insert(
        &self,
        room_key: &str,
        score: i64,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Positions `[start, end]` ordered by ascending score (oldest first).
    fn range_ascending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> impl Future<Output = Result<Vec<Vec<u8>>, StoreError>> + Send;

    /// Positions `[start, end]` ordered by descending score (newest first).
    fn range_descending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> impl Future<Output = Result<Vec<Vec<u8>>, StoreError>> + Send;

    fn range(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
        reverse: bool,
    ) -> impl Future<Output = Result<Vec<Vec<u8>>, StoreError>> + Send {
        async move {
            if reverse {
                self.range_descending(room_key, start, end).await
            } else {
                self.range_ascending(room_key, start, end).await
            }
        }
    }
}

/// Number of positions covered by `[start, end]`, or `None` when empty.
pub(crate) fn range_len(start: i64, end: i64) -> Result<Option<i64>, StoreError> {
    if start < 0 || end < 0 {
        return Err(StoreError::InvalidRange { start, end });
    }
    if start > end {
        return Ok(None);
    }
    Ok(Some((end - start).saturating_add(1)))
}

/// Store backend chosen at startup.
#[derive(Clone)]
pub enum MessageStore {
    Sql(SqlMessageStore),
    Memory(MemoryMessageStore),
}

impl MessageStore {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sql(_) => "database",
            Self::Memory(_) => "memory",
        }
    }
}

impl OrderedMessageStore for MessageStore {
    async fn insert(&self, room_key: &str, score: i64, payload: Vec<u8>) -> Result<(), StoreError> {
        match self {
            Self::Sql(store) => store.insert(room_key, score, payload).await,
            Self::Memory(store) => store.insert(room_key, score, payload).await,
        }
    }

    async fn range_ascending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        match self {
            Self::Sql(store) => store.range_ascending(room_key, start, end).await,
            Self::Memory(store) => store.range_ascending(room_key, start, end).await,
        }
    }

    async fn range_descending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        match self {
            Self::Sql(store) => store.range_descending(room_key, start, end).await,
            Self::Memory(store) => store.range_descending(room_key, start, end).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_len_is_inclusive() {
        assert_eq!(range_len(0, 20).unwrap(), Some(21));
        assert_eq!(range_len(5, 5).unwrap(), Some(1));
        assert_eq!(range_len(6, 5).unwrap(), None);
        assert!(range_len(-1, 5).is_err());
    }

    #[tokio::test]
    async fn range_dispatches_on_direction() {
        let store = MessageStore::Memory(MemoryMessageStore::new());
        store.insert("a:b", 1, b"one".to_vec()).await.unwrap();
        store.insert("a:b", 2, b"two".to_vec()).await.unwrap();

        let forward = store.range("a:b", 0, 10, false).await.unwrap();
        assert_eq!(forward, vec![b"one".to_vec(), b"two".to_vec()]);
        let backward = store.range("a:b", 0, 10, true).await.unwrap();
        assert_eq!(backward, vec![b"two".to_vec(), b"one".to_vec()]);
        assert_eq!(store.kind(), "memory");
    }
}
