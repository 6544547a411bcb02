use serde::{Deserialize, Serialize};
use socialhub_types::{Direction, Identify, ItemId};

/// Newer items by `since_id`, older items by page number.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinceIdPage {
    pub since_id: Option<ItemId>,
    /// 1-origin, unset means the first page.
    pub page: Option<u64>,
}

impl SinceIdPage {
    /// Forward asks for the items directly above the newest one, which is
    /// the page before the current one, so the page index steps back with
    /// it. Backward asks for the next page by index.
    pub fn advance<I: Identify>(&self, direction: Direction, last_batch: &[I]) -> Self {
        match direction {
            Direction::Forward => match last_batch.first() {
                Some(first) => Self {
                    since_id: Some(first.id()),
                    page: self.page.filter(|page| *page > 2).map(|page| page - 1),
                },
                None => self.clone(),
            },
            Direction::Backward => Self {
                since_id: None,
                page: Some(self.page.unwrap_or(1).saturating_add(1)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use socialhub_types::Direction;

    use crate::testing::batch;

    use super::SinceIdPage;

    #[test]
    fn test_advance() {
        let cursor = SinceIdPage::default();

        let items = batch(&[5, 4]);

        assert_eq!(
            cursor.advance(Direction::Forward, &items),
            SinceIdPage {
                since_id: Some("5".into()),
                page: None
            }
        );

        let older = cursor.advance(Direction::Backward, &items);

        assert_eq!(older.page, Some(2));
        assert_eq!(older.advance(Direction::Backward, &items).page, Some(3));

        // the page above page 2 is the first page.
        assert_eq!(older.advance(Direction::Forward, &items).page, None);
    }

    #[test]
    fn test_round_trip() {
        let third = SinceIdPage {
            since_id: None,
            page: Some(3),
        };

        let third_batch = batch(&[6, 5]);

        let second = third.advance(Direction::Forward, &third_batch);

        assert_eq!(
            second,
            SinceIdPage {
                since_id: Some("6".into()),
                page: Some(2)
            }
        );

        // the backend answers the page above item 6.
        let second_batch = batch(&[8, 7]);

        assert_eq!(
            second.advance(Direction::Backward, &second_batch),
            SinceIdPage {
                since_id: None,
                page: Some(3)
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        let cursor = SinceIdPage {
            since_id: Some("5".into()),
            page: None,
        };

        assert_eq!(cursor.advance(Direction::Forward, &batch(&[])), cursor);
    }
}
