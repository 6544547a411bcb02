use std::time::Duration;

use socialhub_types::AccountRef;

/// Backend adapter standard errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Network: {0}")]
    Network(String),
    #[error("Auth: {0}")]
    Auth(String),
    /// Returns if the backend throttled the account
    #[error("RateLimit: request throttled, retry after {0:?}")]
    RateLimit(Option<Duration>),
    /// Returns if the backend doesn't support the requested operation
    #[error("NotImplemented: {0} is not supported by this backend")]
    NotImplemented(String),
    #[error("Timeout: no response within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<BackendError>() {
            Ok(err) => err,
            Err(err) => Self::Other(err),
        }
    }
}

/// One account's fetch failed.
#[derive(Debug, thiserror::Error)]
#[error("Fetch: account({account}) failed, {cause}")]
pub struct FetchError {
    pub account: AccountRef,
    #[source]
    pub cause: BackendError,
}

impl FetchError {
    pub fn new<E: Into<BackendError>>(account: AccountRef, cause: E) -> Self {
        Self {
            account,
            cause: cause.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, BackendError::Timeout(_))
    }
}
