use serde::{Deserialize, Serialize};
use socialhub_types::{Direction, Identify, ItemId};

use crate::Terminal;

/// `since_id`/`until_id` window (exclusive on both ends).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdWindow {
    pub since_id: Option<ItemId>,
    pub until_id: Option<ItemId>,
}

impl IdWindow {
    /// Items newer than `id`.
    pub fn since<I: Into<ItemId>>(id: I) -> Self {
        Self {
            since_id: Some(id.into()),
            until_id: None,
        }
    }

    /// Items older than `id`.
    pub fn until<I: Into<ItemId>>(id: I) -> Self {
        Self {
            since_id: None,
            until_id: Some(id.into()),
        }
    }

    /// Anchor the window on the newest (forward) or oldest (backward) item.
    ///
    /// An empty batch keeps the boundary already held for `direction`; a
    /// window without one has nothing to anchor on and is terminal.
    pub fn advance<I: Identify>(
        &self,
        direction: Direction,
        last_batch: &[I],
    ) -> Result<Self, Terminal> {
        match direction {
            Direction::Forward => last_batch
                .first()
                .map(|item| item.id())
                .or_else(|| self.since_id.clone())
                .map(Self::since),
            Direction::Backward => last_batch
                .last()
                .map(|item| item.id())
                .or_else(|| self.until_id.clone())
                .map(Self::until),
        }
        .ok_or(Terminal::new(direction))
    }
}
