use serde::{Deserialize, Serialize};
use socialhub_types::Direction;

use crate::Terminal;

/// Cursor for token based backends.
///
/// The backend hands out a `previous` token (newer items) and a `next`
/// token (older items) with every page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenCursor {
    pub previous: Option<String>,
    pub current: Option<String>,
    pub next: Option<String>,
}

impl TokenCursor {
    pub fn new<P, C, N>(previous: Option<P>, current: Option<C>, next: Option<N>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
        N: Into<String>,
    {
        Self {
            previous: previous.map(Into::into),
            current: current.map(Into::into),
            next: next.map(Into::into),
        }
    }

    /// Cursor requesting the page behind `token`.
    pub fn at<S: Into<String>>(token: S) -> Self {
        Self {
            previous: None,
            current: Some(token.into()),
            next: None,
        }
    }

    /// Move to the `previous` (forward) or `next` (backward) token.
    ///
    /// The tokens of the resulting cursor are filled by the backend once the
    /// page is fetched.
    pub fn advance(&self, direction: Direction) -> Result<Self, Terminal> {
        let token = match direction {
            Direction::Forward => self.previous.as_ref(),
            Direction::Backward => self.next.as_ref(),
        };

        token
            .map(|token| Self::at(token.clone()))
            .ok_or(Terminal::new(direction))
    }
}
