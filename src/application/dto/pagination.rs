// src/application/dto/pagination.rs

/// One keyset page of query results.
///
/// `next_cursor` is set only when more items follow; passing it back resumes
/// right after the last item of this page.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            has_more: next_cursor.is_some(),
            items,
            next_cursor,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_follows_the_cursor() {
        let last = CursorPage::new(vec![1, 2], None);
        assert!(!last.has_more);

        let page = CursorPage::new(vec![3], Some("abc".into())).map(|n| n * 10);
        assert!(page.has_more);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }
}
