use socialhub_types::{Direction, Identify};

use crate::{PageCursor, Terminal};

/// One fetched batch bound to the cursor describing it.
///
/// `items` keep the order the backend returned them in. The value is
/// immutable; paging produces new results instead of updating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    items: Vec<T>,
    cursor: PageCursor,
    has_more: bool,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, cursor: PageCursor, has_more: bool) -> Self {
        Self {
            items,
            cursor,
            has_more,
        }
    }

    /// Empty no-op result for a cursor that cannot move any further.
    pub fn terminal(cursor: PageCursor) -> Self {
        Self::new(vec![], cursor, false)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Whether the backend reported more items beyond this batch.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Identify> PageResult<T> {
    /// Cursor of the page adjacent to this one in `direction`.
    pub fn advance(&self, direction: Direction) -> Result<PageCursor, Terminal> {
        self.cursor.advance(direction, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use socialhub_types::Direction;

    use crate::{testing::batch, IdWindow, PageCursor, PageNumber, Terminal};

    use super::PageResult;

    #[test]
    fn test_advance_uses_own_items() {
        let result = PageResult::new(batch(&[9, 8, 7]), IdWindow::default().into(), true);

        assert_eq!(
            result.advance(Direction::Forward),
            Ok(PageCursor::IdWindow(IdWindow::since("9")))
        );

        assert_eq!(
            result.advance(Direction::Backward),
            Ok(PageCursor::IdWindow(IdWindow::until("7")))
        );

        assert_eq!(result.len(), 3);
        assert!(result.has_more());
    }

    #[test]
    fn test_terminal() {
        let result = PageResult::<crate::testing::Item>::terminal(PageNumber::default().into());

        assert!(result.is_empty());
        assert!(!result.has_more());

        assert_eq!(
            result.advance(Direction::Forward),
            Err(Terminal::new(Direction::Forward))
        );
    }
}
