use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use socialhub_account::FetchOptions;
use socialhub_types::AccountRef;

/// Aggregation group configuration.
///
/// ```json
/// {
///     "fetch": { "count": 40, "timeoutMs": 5000 },
///     "accounts": { "slack:T024BE7LD": { "count": 100 } }
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupConfig {
    /// Options applied to every account.
    pub fetch: FetchOptions,
    /// Per account replacements of `fetch`.
    pub accounts: BTreeMap<AccountRef, FetchOptions>,
}

impl GroupConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn options_for(&self, account: &AccountRef) -> FetchOptions {
        self.accounts.get(account).copied().unwrap_or(self.fetch)
    }
}
