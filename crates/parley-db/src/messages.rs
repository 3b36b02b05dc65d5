use crate::store::{range_len, OrderedMessageStore};
use crate::{DbPool, StoreError};

/// Ordered store backed by the `room_messages` table.
///
/// Ties on `score` fall back to the autoincrement `id`, i.e. insertion order.
#[derive(Clone)]
pub struct SqlMessageStore {
    pool: DbPool,
}

impl SqlMessageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn fetch_range(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
        descending: bool,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        let Some(count) = range_len(start, end)? else {
            return Ok(Vec::new());
        };
        let sql = if descending {
            "SELECT payload FROM room_messages
             WHERE room_key = $1
             ORDER BY score DESC, id DESC
             LIMIT $2 OFFSET $3"
        } else {
            "SELECT payload FROM room_messages
             WHERE room_key = $1
             ORDER BY score ASC, id ASC
             LIMIT $2 OFFSET $3"
        };
        let rows: Vec<Vec<u8>> = sqlx::query_scalar(sql)
            .bind(room_key)
            .bind(count)
            .bind(start)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

impl OrderedMessageStore for SqlMessageStore {
    async fn insert(&self, room_key: &str, score: i64, payload: Vec<u8>) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO room_messages (room_key, score, payload) VALUES ($1, $2, $3)")
            .bind(room_key)
            .bind(score)
            .bind(payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn range_ascending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        self.fetch_range(room_key, start, end, false).await
    }

    async fn range_descending(
        &self,
        room_key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        self.fetch_range(room_key, start, end, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::SqlMessageStore;
    use crate::store::OrderedMessageStore;
    use crate::{create_pool, run_migrations, DatabaseEngine, StoreError};

    async fn store() -> SqlMessageStore {
        let pool = create_pool("sqlite::memory:", 1).await.expect("pool");
        run_migrations(&pool, DatabaseEngine::Sqlite)
            .await
            .expect("migrations");
        SqlMessageStore::new(pool)
    }

    fn payloads(items: &[&str]) -> Vec<Vec<u8>> {
        items.iter().map(|item| item.as_bytes().to_vec()).collect()
    }

    #[tokio::test]
    async fn orders_by_score_in_both_directions() {
        let store = store().await;
        store.insert("a:b", 30, b"third".to_vec()).await.expect("insert");
        store.insert("a:b", 10, b"first".to_vec()).await.expect("insert");
        store.insert("a:b", 20, b"second".to_vec()).await.expect("insert");

        let asc = store.range_ascending("a:b", 0, 10).await.expect("range");
        assert_eq!(asc, payloads(&["first", "second", "third"]));
        let desc = store.range_descending("a:b", 0, 10).await.expect("range");
        assert_eq!(desc, payloads(&["third", "second", "first"]));
    }

    #[tokio::test]
    async fn equal_scores_keep_insertion_order() {
        let store = store().await;
        for text in ["x", "y", "z"] {
            store.insert("a:b", 5, text.as_bytes().to_vec()).await.expect("insert");
        }
        let asc = store.range_ascending("a:b", 0, 2).await.expect("range");
        assert_eq!(asc, payloads(&["x", "y", "z"]));
    }

    #[tokio::test]
    async fn ranges_are_inclusive_and_truncated() {
        let store = store().await;
        for score in 0..5 {
            store
                .insert("a:b", score, score.to_string().into_bytes())
                .await
                .expect("insert");
        }
        assert_eq!(
            store.range_ascending("a:b", 1, 2).await.expect("range"),
            payloads(&["1", "2"])
        );
        assert_eq!(
            store.range_ascending("a:b", 3, 40).await.expect("range"),
            payloads(&["3", "4"])
        );
        assert!(store.range_ascending("a:b", 5, 9).await.expect("range").is_empty());
        assert!(store.range_ascending("a:b", 2, 1).await.expect("range").is_empty());
    }

    #[tokio::test]
    async fn rooms_are_isolated_and_duplicates_are_kept() {
        let store = store().await;
        store.insert("a:b", 1, b"same".to_vec()).await.expect("insert");
        store.insert("a:b", 1, b"same".to_vec()).await.expect("insert");
        store.insert("c:d", 1, b"other".to_vec()).await.expect("insert");

        assert_eq!(
            store.range_ascending("a:b", 0, 10).await.expect("range").len(),
            2
        );
        assert_eq!(
            store.range_descending("c:d", 0, 10).await.expect("range"),
            payloads(&["other"])
        );
        assert!(store.range_ascending("e:f", 0, 10).await.expect("range").is_empty());
    }

    #[tokio::test]
    async fn negative_positions_are_rejected() {
        let store = store().await;
        let err = store
            .range_ascending("a:b", -1, 3)
            .await
            .expect_err("negative start must fail");
        assert!(matches!(err, StoreError::InvalidRange { start: -1, end: 3 }));
    }
}
