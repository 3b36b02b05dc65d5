use serde::Serialize;

use crate::validation::ValidationError;

/// Page size used when a pull request asks for `limit = 0`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Inclusive position window `[start, end]` requested from the store.
///
/// The window spans `limit + 1` positions: the extra item is only used to
/// detect whether another page exists. The next cursor is `end` itself, so
/// consecutive pages overlap by one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: i64,
    pub end: i64,
    pub limit: i64,
}

impl PageWindow {
    pub fn new(cursor: i64, limit: i32) -> Result<Self, ValidationError> {
        if cursor < 0 {
            return Err(ValidationError::InvalidPageRequest(format!(
                "cursor must not be negative (got {cursor})"
            )));
        }
        if limit < 0 {
            return Err(ValidationError::InvalidPageRequest(format!(
                "limit must not be negative (got {limit})"
            )));
        }
        let limit = if limit == 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            i64::from(limit)
        };
        Ok(Self {
            start: cursor,
            end: cursor.saturating_add(limit),
            limit,
        })
    }

    /// Trim store results (in store order) down to one page.
    pub fn paginate<T, I>(&self, items: I) -> CursorPage<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut page = Vec::new();
        let mut has_more = false;
        let mut next_cursor = 0;
        for item in items {
            if page.len() as i64 + 1 > self.limit {
                has_more = true;
                next_cursor = self.end;
                break;
            }
            page.push(item);
        }
        CursorPage {
            items: page,
            has_more,
            next_cursor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: i64,
}

impl<T> CursorPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            next_cursor: self.next_cursor,
        }
    }
}
