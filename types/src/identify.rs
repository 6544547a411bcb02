use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend assigned item id.
///
/// Backends use numbers (Tumblr), snowflakes rendered as text (Twitter,
/// Misskey) or float timestamps (Slack), so the id is kept as opaque text.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Items carrying a backend id.
pub trait Identify {
    fn id(&self) -> ItemId;
}

/// Items carrying a creation timestamp, used to order merged timelines.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}
