//! Timeline comment model (post, reply, message).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountRef, Identify, ItemId, Timestamped};

/// One timeline entry as seen through an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Backend item id.
    pub id: ItemId,
    /// Account the comment was fetched through.
    pub account: AccountRef,
    pub created_at: DateTime<Utc>,
    /// Plain display text.
    pub text: String,
}

impl Identify for Comment {
    fn id(&self) -> ItemId {
        self.id.clone()
    }
}

impl Timestamped for Comment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
