use serde::{Deserialize, Serialize};
use socialhub_types::Direction;

use crate::Terminal;

/// 1-origin page number, page 1 holds the newest items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageNumber {
    page: u64,
}

impl PageNumber {
    /// Page numbers below 1 are clamped to 1.
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1) }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn advance(&self, direction: Direction) -> Result<Self, Terminal> {
        match direction {
            Direction::Forward if self.page > 1 => Ok(Self::new(self.page - 1)),
            Direction::Forward => Err(Terminal::new(direction)),
            Direction::Backward => Ok(Self::new(self.page.saturating_add(1))),
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::new(1)
    }
}
