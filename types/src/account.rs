//! Account identity types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ServiceType, ServiceTypeError};

#[derive(Debug, thiserror::Error)]
pub enum AccountRefError {
    #[error("AccountRef: expect `service:id`, got ({0})")]
    Format(String),
    #[error(transparent)]
    Service(#[from] ServiceTypeError),
}

/// Reference to one authenticated account on one backend.
///
/// Two accounts on different services never represent the same identity,
/// even when their ids are equal.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountRef {
    /// Backend the account belongs to.
    pub service: ServiceType,
    /// Backend local account id (user id, tag, etc.)
    pub id: String,
}

impl AccountRef {
    pub fn new<S: Into<String>>(service: ServiceType, id: S) -> Self {
        Self {
            service,
            id: id.into(),
        }
    }
}

impl Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.service, self.id)
    }
}

impl FromStr for AccountRef {
    type Err = AccountRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (service, id) = s
            .split_once(':')
            .ok_or_else(|| AccountRefError::Format(s.to_owned()))?;

        if id.is_empty() {
            return Err(AccountRefError::Format(s.to_owned()));
        }

        Ok(Self::new(service.parse()?, id))
    }
}

impl Serialize for AccountRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::ServiceType;

    use super::AccountRef;

    #[test]
    fn test_parse() {
        let account: AccountRef = "mastodon:alice@example.social".parse().unwrap();

        assert_eq!(account.service, ServiceType::Mastodon);
        assert_eq!(account.id, "alice@example.social");
        assert_eq!(account.to_string(), "mastodon:alice@example.social");

        assert!("mastodon".parse::<AccountRef>().is_err());
        assert!("mastodon:".parse::<AccountRef>().is_err());
        assert!("myspace:tom".parse::<AccountRef>().is_err());
    }

    #[test]
    fn test_serde() {
        let account = AccountRef::new(ServiceType::Slack, "U024BE7LH");

        let json = serde_json::to_string(&account).unwrap();

        assert_eq!(json, "\"slack:U024BE7LH\"");

        let decoded: AccountRef = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, account);
    }
}
