//! Backend service kinds.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ServiceTypeError {
    #[error("ServiceType: unknown service name({0})")]
    Unknown(String),
}

/// Remote services an account can be bound to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    Twitter,
    Mastodon,
    Misskey,
    Slack,
    Tumblr,
    Facebook,
    Discord,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Mastodon => "mastodon",
            Self::Misskey => "misskey",
            Self::Slack => "slack",
            Self::Tumblr => "tumblr",
            Self::Facebook => "facebook",
            Self::Discord => "discord",
        }
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ServiceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Self::Twitter),
            "mastodon" => Ok(Self::Mastodon),
            "misskey" => Ok(Self::Misskey),
            "slack" => Ok(Self::Slack),
            "tumblr" => Ok(Self::Tumblr),
            "facebook" => Ok(Self::Facebook),
            "discord" => Ok(Self::Discord),
            _ => Err(ServiceTypeError::Unknown(s.to_owned())),
        }
    }
}
