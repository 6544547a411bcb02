use std::fmt::Display;

use serde::{Deserialize, Serialize};
use socialhub_types::{Direction, Identify};

use crate::{DateRange, IdWindow, PageNumber, SinceIdPage, TokenCursor};

/// Returned when a cursor cannot move any further in `direction`.
///
/// This is an expected outcome (e.g. already at the newest page), not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub direction: Direction,
}

impl Terminal {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Terminal: no further page {}", self.direction)
    }
}

/// Backend specific resume state.
///
/// Cursors are immutable values; [`advance`](PageCursor::advance) returns a
/// new cursor and never touches the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageCursor {
    /// Opaque previous/next tokens (Twitter, Slack conversations).
    Token(TokenCursor),
    /// Latest/oldest boundaries with an inclusive flag (Slack history).
    DateRange(DateRange),
    /// 1-origin page index (search endpoints).
    Page(PageNumber),
    /// since/until id window (Mastodon, Misskey).
    IdWindow(IdWindow),
    /// since id for newer items, page index for older ones (Tumblr).
    SinceIdPage(SinceIdPage),
}

impl PageCursor {
    /// Compute the cursor adjacent to `last_batch` in `direction`.
    ///
    /// `last_batch` is the batch fetched with `self`, in backend order
    /// (newest first). It may be empty.
    pub fn advance<I: Identify>(
        &self,
        direction: Direction,
        last_batch: &[I],
    ) -> Result<PageCursor, Terminal> {
        let next = match self {
            Self::Token(cursor) => cursor.advance(direction).map(Self::Token),
            Self::DateRange(cursor) => Ok(Self::DateRange(cursor.advance(direction, last_batch))),
            Self::Page(cursor) => cursor.advance(direction).map(Self::Page),
            Self::IdWindow(cursor) => cursor.advance(direction, last_batch).map(Self::IdWindow),
            Self::SinceIdPage(cursor) => {
                Ok(Self::SinceIdPage(cursor.advance(direction, last_batch)))
            }
        };

        log::trace!("advance {} {:?} -> {:?}", direction, self, next);

        next
    }
}

impl From<TokenCursor> for PageCursor {
    fn from(value: TokenCursor) -> Self {
        Self::Token(value)
    }
}

impl From<DateRange> for PageCursor {
    fn from(value: DateRange) -> Self {
        Self::DateRange(value)
    }
}

impl From<PageNumber> for PageCursor {
    fn from(value: PageNumber) -> Self {
        Self::Page(value)
    }
}

impl From<IdWindow> for PageCursor {
    fn from(value: IdWindow) -> Self {
        Self::IdWindow(value)
    }
}

impl From<SinceIdPage> for PageCursor {
    fn from(value: SinceIdPage) -> Self {
        Self::SinceIdPage(value)
    }
}
