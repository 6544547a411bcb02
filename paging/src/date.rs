use serde::{Deserialize, Serialize};
use socialhub_types::{Direction, Identify, ItemId};

/// Cursor for backends paging by a `latest`/`oldest` range.
///
/// Boundaries are item ids (Slack uses message timestamps as ids).
/// `inclusive` controls whether the boundary item itself is returned again.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub latest: Option<ItemId>,
    pub oldest: Option<ItemId>,
    pub inclusive: Option<bool>,
}

impl DateRange {
    /// Range of items newer than `oldest`.
    pub fn newer_than<I: Into<ItemId>>(oldest: I, inclusive: bool) -> Self {
        Self {
            latest: None,
            oldest: Some(oldest.into()),
            inclusive: Some(inclusive),
        }
    }

    /// Range of items older than `latest`.
    pub fn older_than<I: Into<ItemId>>(latest: I, inclusive: bool) -> Self {
        Self {
            latest: Some(latest.into()),
            oldest: None,
            inclusive: Some(inclusive),
        }
    }

    /// Step past the first (forward) or last (backward) item of `last_batch`.
    ///
    /// Without items the range is rebuilt from the opposite boundary with
    /// `inclusive` flipped; if that is not possible the same range is
    /// requested again.
    pub fn advance<I: Identify>(&self, direction: Direction, last_batch: &[I]) -> Self {
        let edge = match direction {
            Direction::Forward => last_batch.first(),
            Direction::Backward => last_batch.last(),
        };

        if let Some(edge) = edge {
            return match direction {
                Direction::Forward => Self::newer_than(edge.id(), false),
                Direction::Backward => Self::older_than(edge.id(), false),
            };
        }

        let boundary = match direction {
            Direction::Forward => self.latest.as_ref(),
            Direction::Backward => self.oldest.as_ref(),
        };

        match (boundary, self.inclusive) {
            (Some(boundary), Some(inclusive)) => match direction {
                Direction::Forward => Self::newer_than(boundary.clone(), !inclusive),
                Direction::Backward => Self::older_than(boundary.clone(), !inclusive),
            },
            _ => self.clone(),
        }
    }
}
