use std::{fmt::Debug, sync::Arc};

use socialhub_paging::{PageCursor, PageResult};
use socialhub_types::{AccountRef, Direction, Identify};

use crate::{Backend, BackendError, FetchError, FetchOptions};

/// One account bound to its current page.
///
/// Pagers are values: advancing returns a new pager and leaves `self`
/// untouched, so a caller holding an older pager keeps a consistent view.
pub struct AccountPager<T> {
    account: AccountRef,
    backend: Arc<dyn Backend<T>>,
    current: Arc<PageResult<T>>,
    options: FetchOptions,
}

impl<T> Clone for AccountPager<T> {
    fn clone(&self) -> Self {
        Self {
            account: self.account.clone(),
            backend: self.backend.clone(),
            current: self.current.clone(),
            options: self.options,
        }
    }
}

impl<T: Debug> Debug for AccountPager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountPager")
            .field("account", &self.account)
            .field("current", &self.current)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<T> AccountPager<T> {
    /// Create pager from an already fetched page.
    pub fn new(account: AccountRef, backend: Arc<dyn Backend<T>>, current: PageResult<T>) -> Self {
        Self {
            account,
            backend,
            current: Arc::new(current),
            options: Default::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn account(&self) -> &AccountRef {
        &self.account
    }

    pub fn current(&self) -> &PageResult<T> {
        &self.current
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Returns true if both pagers share the very same current page.
    pub fn same_page(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }

    fn replace(&self, current: PageResult<T>) -> Self {
        Self {
            current: Arc::new(current),
            ..self.clone()
        }
    }

    async fn request(
        &self,
        cursor: Option<PageCursor>,
        direction: Direction,
    ) -> Result<PageResult<T>, FetchError> {
        request(
            &self.account,
            self.backend.as_ref(),
            &self.options,
            cursor,
            direction,
        )
        .await
    }
}

/// Call the backend, bounded by the configured timeout.
async fn request<T>(
    account: &AccountRef,
    backend: &dyn Backend<T>,
    options: &FetchOptions,
    cursor: Option<PageCursor>,
    direction: Direction,
) -> Result<PageResult<T>, FetchError> {
    let fetch = backend.fetch(cursor, direction, options.count);

    let result = match options.timeout() {
        Some(duration) => match async_std::future::timeout(duration, fetch).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(duration).into()),
        },
        None => fetch.await,
    };

    result.map_err(|err| FetchError::new(account.clone(), err))
}

impl<T: Identify> AccountPager<T> {
    /// Initial cursor-less fetch of the newest page.
    pub async fn load(
        account: AccountRef,
        backend: Arc<dyn Backend<T>>,
        options: FetchOptions,
    ) -> Result<Self, FetchError> {
        let current = request(&account, backend.as_ref(), &options, None, Direction::Forward).await?;

        log::debug!("account({}) loaded {} items", account, current.len());

        Ok(Self::new(account, backend, current).with_options(options))
    }

    /// Fetch the page adjacent to the current one without building a new pager.
    ///
    /// A terminal cursor doesn't reach the backend and yields an empty
    /// result bound to the unchanged cursor.
    pub async fn fetch(&self, direction: Direction) -> Result<PageResult<T>, FetchError> {
        let cursor = match self.current.advance(direction) {
            Ok(cursor) => cursor,
            Err(terminal) => {
                log::debug!("account({}) {}", self.account, terminal);

                return Ok(PageResult::terminal(self.current.cursor().clone()));
            }
        };

        let page = self.request(Some(cursor), direction).await?;

        log::debug!(
            "account({}) fetched {} items {}",
            self.account,
            page.len(),
            direction
        );

        Ok(page)
    }

    /// Returns a pager positioned on the adjacent page.
    ///
    /// An empty batch doesn't replace a non-empty current page: the current
    /// page stays the anchor for both directions, and the returned pager
    /// reports [`same_page`](Self::same_page) with `self`.
    pub async fn advance(&self, direction: Direction) -> Result<Self, FetchError> {
        let page = self.fetch(direction).await?;

        if page.is_empty() && !self.current.is_empty() {
            log::debug!(
                "account({}) nothing {}, keep current page",
                self.account,
                direction
            );

            return Ok(self.clone());
        }

        Ok(self.replace(page))
    }

    /// Step toward newer items.
    pub async fn advance_forward(&self) -> Result<Self, FetchError> {
        self.advance(Direction::Forward).await
    }

    /// Step toward older items.
    pub async fn advance_backward(&self) -> Result<Self, FetchError> {
        self.advance(Direction::Backward).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use socialhub_paging::{IdWindow, PageCursor, PageNumber, PageResult};
    use socialhub_types::{AccountRef, Comment, Identify, ItemId, ServiceType};

    use crate::{
        mock::{MockBackend, MockScheme},
        BackendError, FetchOptions,
    };

    use super::AccountPager;

    fn account() -> AccountRef {
        AccountRef::new(ServiceType::Misskey, "alice")
    }

    fn ids(items: &[Comment]) -> Vec<ItemId> {
        items.iter().map(Identify::id).collect()
    }

    fn ids_of(values: &[u64]) -> Vec<ItemId> {
        values.iter().copied().map(ItemId::from).collect()
    }

    fn backend(scheme: MockScheme) -> MockBackend {
        let backend = MockBackend::new(account(), scheme);

        for id in 1..=10 {
            backend.post(id, Utc.timestamp_opt(id as i64 * 60, 0).unwrap());
        }

        backend
    }

    #[async_std::test]
    async fn test_page_forward_and_backward() {
        _ = pretty_env_logger::try_init();

        let backend = backend(MockScheme::IdWindow);

        let options = FetchOptions::default().with_count(4);

        let pager = AccountPager::load(account(), backend.handle(), options)
            .await
            .unwrap();

        assert_eq!(ids(pager.current().items()), ids_of(&[10, 9, 8, 7]));

        let older = pager.advance_backward().await.unwrap();

        assert_eq!(ids(older.current().items()), ids_of(&[6, 5, 4, 3]));

        // the loaded pager is untouched.
        assert_eq!(ids(pager.current().items()), ids_of(&[10, 9, 8, 7]));

        backend.post(11, Utc.timestamp_opt(11 * 60, 0).unwrap());

        let newer = pager.advance_forward().await.unwrap();

        assert_eq!(ids(newer.current().items()), ids_of(&[11]));
        assert_eq!(
            newer.current().cursor(),
            &PageCursor::IdWindow(IdWindow::since("10"))
        );
    }

    #[async_std::test]
    async fn test_empty_refresh_keeps_older_pages() {
        _ = pretty_env_logger::try_init();

        let backend = backend(MockScheme::IdWindow);

        let options = FetchOptions::default().with_count(4);

        let pager = AccountPager::load(account(), backend.handle(), options)
            .await
            .unwrap();

        // nothing new was posted.
        let refreshed = pager.advance_forward().await.unwrap();

        assert!(refreshed.same_page(&pager));
        assert_eq!(backend.requests().len(), 2);

        let older = refreshed.advance_backward().await.unwrap();

        assert_eq!(backend.requests().len(), 3);
        assert_eq!(ids(older.current().items()), ids_of(&[6, 5, 4, 3]));
    }

    #[async_std::test]
    async fn test_since_id_page_round_trip() {
        let backend = backend(MockScheme::SinceIdPage);

        let options = FetchOptions::default().with_count(2);

        let first = AccountPager::load(account(), backend.handle(), options)
            .await
            .unwrap();

        assert_eq!(ids(first.current().items()), ids_of(&[10, 9]));

        let second = first.advance_backward().await.unwrap();
        let third = second.advance_backward().await.unwrap();

        assert_eq!(ids(second.current().items()), ids_of(&[8, 7]));
        assert_eq!(ids(third.current().items()), ids_of(&[6, 5]));

        let back_up = third.advance_forward().await.unwrap();

        assert_eq!(ids(back_up.current().items()), ids_of(&[8, 7]));

        // neither repeats the page above nor skips the one below.
        let down_again = back_up.advance_backward().await.unwrap();

        assert_eq!(ids(down_again.current().items()), ids_of(&[6, 5]));
    }

    #[async_std::test]
    async fn test_terminal_skips_backend() {
        let backend = backend(MockScheme::Page);

        let pager = AccountPager::new(
            account(),
            backend.handle(),
            PageResult::new(vec![], PageNumber::default().into(), true),
        );

        let page = pager.fetch(socialhub_types::Direction::Forward).await.unwrap();

        assert!(page.is_empty());
        assert!(!page.has_more());
        assert_eq!(page.cursor(), &PageCursor::Page(PageNumber::default()));
        assert!(backend.requests().is_empty());

        let older = pager.advance_backward().await.unwrap();

        assert_eq!(
            older.current().cursor(),
            &PageCursor::Page(PageNumber::new(2))
        );
        assert_eq!(backend.requests().len(), 1);
    }

    #[async_std::test]
    async fn test_failure_keeps_account() {
        let backend = backend(MockScheme::IdWindow);

        let pager = AccountPager::load(account(), backend.handle(), Default::default())
            .await
            .unwrap();

        backend.fail_next(BackendError::Auth("token revoked".to_owned()));

        let err = pager.advance_backward().await.unwrap_err();

        assert_eq!(err.account, account());
        assert!(matches!(err.cause, BackendError::Auth(_)));

        // next call goes through again.
        assert!(pager.advance_backward().await.is_ok());
    }

    #[async_std::test]
    async fn test_timeout() {
        let backend = backend(MockScheme::IdWindow);

        let pager = AccountPager::load(account(), backend.handle(), Default::default())
            .await
            .unwrap()
            .with_options(FetchOptions::default().with_timeout(Duration::from_millis(20)));

        backend.set_delay(Some(Duration::from_millis(500)));

        let err = pager.advance_forward().await.unwrap_err();

        assert!(err.is_timeout());
    }
}
