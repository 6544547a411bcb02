//! In-memory backend speaking every cursor scheme.

use std::{
    collections::VecDeque,
    ops::Range,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use socialhub_paging::{
    DateRange, IdWindow, PageCursor, PageNumber, PageResult, SinceIdPage, TokenCursor,
};
use socialhub_types::{AccountRef, Comment, Direction, ItemId};

use crate::{Backend, BackendError};

const DEFAULT_COUNT: u32 = 20;

/// Pagination scheme the mock answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockScheme {
    Token,
    DateRange,
    Page,
    IdWindow,
    SinceIdPage,
}

#[derive(Debug)]
struct MockBackendImpl {
    account: AccountRef,
    scheme: MockScheme,
    /// Newest first.
    timeline: Vec<Comment>,
    failures: VecDeque<BackendError>,
    delay: Option<Duration>,
    requests: Vec<Option<PageCursor>>,
}

impl Drop for MockBackendImpl {
    fn drop(&mut self) {
        log::debug!("drop mock backend {}", self.account);
    }
}

#[derive(Debug, Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendImpl>>,
}

impl MockBackend {
    pub fn new(account: AccountRef, scheme: MockScheme) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockBackendImpl {
                account,
                scheme,
                timeline: vec![],
                failures: Default::default(),
                delay: None,
                requests: vec![],
            })),
        }
    }

    /// Shared handle usable as a pager backend.
    pub fn handle(&self) -> Arc<dyn Backend<Comment>> {
        Arc::new(self.clone())
    }

    /// Publish one comment on the account's timeline.
    pub fn post(&self, id: u64, created_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();

        let comment = Comment {
            id: id.into(),
            account: inner.account.clone(),
            created_at,
            text: format!("comment {}", id),
        };

        inner.timeline.push(comment);

        inner
            .timeline
            .sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    }

    /// Fail the next fetch with `err`. Calls queue up.
    pub fn fail_next(&self, err: BackendError) {
        self.inner.lock().unwrap().failures.push_back(err);
    }

    /// Delay every fetch by `delay`.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.inner.lock().unwrap().delay = delay;
    }

    /// Cursors received so far, in call order.
    pub fn requests(&self) -> Vec<Option<PageCursor>> {
        self.inner.lock().unwrap().requests.clone()
    }
}

impl MockBackendImpl {
    fn position(&self, id: &ItemId) -> anyhow::Result<usize> {
        self.timeline
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| anyhow::format_err!("Mock: unknown item id({})", id))
    }

    /// Up to `count` items directly above (newer than) `pos`.
    fn newer_than(&self, pos: usize, count: usize) -> Range<usize> {
        pos.saturating_sub(count)..pos
    }

    /// Up to `count` items starting at `start`.
    fn starting_at(&self, start: usize, count: usize) -> Range<usize> {
        let start = start.min(self.timeline.len());

        start..(start + count).min(self.timeline.len())
    }

    fn page(&self, range: Range<usize>, cursor: PageCursor) -> PageResult<Comment> {
        let has_more = range.end < self.timeline.len();

        PageResult::new(self.timeline[range].to_vec(), cursor, has_more)
    }

    fn token(&self, cursor: Option<&TokenCursor>, count: usize) -> anyhow::Result<PageResult<Comment>> {
        let current = cursor.and_then(|c| c.current.clone());

        let range = match current.as_deref().and_then(|t| t.split_once(':')) {
            Some(("newer", id)) => self.newer_than(self.position(&id.into())?, count),
            Some(("older", id)) => self.starting_at(self.position(&id.into())? + 1, count),
            _ => self.starting_at(0, count),
        };

        let items = &self.timeline[range.clone()];

        let previous = match items.first() {
            Some(first) => Some(format!("newer:{}", first.id)),
            None => match current.as_deref().and_then(|t| t.split_once(':')) {
                Some((_, id)) => Some(format!("newer:{}", id)),
                None => None,
            },
        };

        let next = match items.last() {
            Some(last) if range.end < self.timeline.len() => Some(format!("older:{}", last.id)),
            _ => None,
        };

        let cursor = TokenCursor {
            previous,
            current,
            next,
        };

        Ok(self.page(range, cursor.into()))
    }

    fn date_range(&self, range: &DateRange, count: usize) -> anyhow::Result<PageResult<Comment>> {
        let inclusive = range.inclusive.unwrap_or(false) as usize;

        let upper = match &range.latest {
            Some(latest) => self.position(latest)? + 1 - inclusive,
            None => 0,
        };

        let window = match &range.oldest {
            Some(oldest) => {
                let lower = self.position(oldest)? + inclusive;
                let lower = lower.max(upper);

                self.newer_than(lower, count.min(lower - upper))
            }
            None => self.starting_at(upper, count),
        };

        Ok(self.page(window, range.clone().into()))
    }

    fn id_window(&self, window: &IdWindow, count: usize) -> anyhow::Result<PageResult<Comment>> {
        let upper = match &window.until_id {
            Some(until) => self.position(until)? + 1,
            None => 0,
        };

        let range = match &window.since_id {
            Some(since) => {
                let lower = self.position(since)?.max(upper);

                self.newer_than(lower, count.min(lower - upper))
            }
            None => self.starting_at(upper, count),
        };

        Ok(self.page(range, window.clone().into()))
    }

    fn fetch(
        &mut self,
        cursor: Option<PageCursor>,
        count: Option<u32>,
    ) -> anyhow::Result<PageResult<Comment>> {
        self.requests.push(cursor.clone());

        if let Some(err) = self.failures.pop_front() {
            return Err(err.into());
        }

        let count = count.unwrap_or(DEFAULT_COUNT) as usize;

        match (self.scheme, cursor) {
            (MockScheme::Token, None) => self.token(None, count),
            (MockScheme::Token, Some(PageCursor::Token(cursor))) => self.token(Some(&cursor), count),
            (MockScheme::DateRange, None) => self.date_range(&DateRange::default(), count),
            (MockScheme::DateRange, Some(PageCursor::DateRange(range))) => {
                self.date_range(&range, count)
            }
            (MockScheme::Page, cursor) => {
                let page = match cursor {
                    Some(PageCursor::Page(page)) => page,
                    None => PageNumber::default(),
                    Some(other) => return Err(unsupported(other)),
                };

                let start = (page.page() as usize - 1) * count;

                Ok(self.page(self.starting_at(start, count), page.into()))
            }
            (MockScheme::IdWindow, None) => self.id_window(&IdWindow::default(), count),
            (MockScheme::IdWindow, Some(PageCursor::IdWindow(window))) => {
                self.id_window(&window, count)
            }
            (MockScheme::SinceIdPage, cursor) => {
                let cursor = match cursor {
                    Some(PageCursor::SinceIdPage(cursor)) => cursor,
                    None => SinceIdPage::default(),
                    Some(other) => return Err(unsupported(other)),
                };

                let range = match &cursor.since_id {
                    Some(since) => self.newer_than(self.position(since)?, count),
                    None => {
                        let start = (cursor.page.unwrap_or(1).max(1) as usize - 1) * count;
                        self.starting_at(start, count)
                    }
                };

                Ok(self.page(range, cursor.into()))
            }
            (_, Some(other)) => Err(unsupported(other)),
        }
    }
}

fn unsupported(cursor: PageCursor) -> anyhow::Error {
    BackendError::NotImplemented(format!("cursor {:?}", cursor)).into()
}

#[async_trait]
impl Backend<Comment> for MockBackend {
    async fn fetch(
        &self,
        cursor: Option<PageCursor>,
        direction: Direction,
        count: Option<u32>,
    ) -> anyhow::Result<PageResult<Comment>> {
        let delay = self.inner.lock().unwrap().delay;

        if let Some(delay) = delay {
            async_std::task::sleep(delay).await;
        }

        let mut inner = self.inner.lock().unwrap();

        log::debug!("mock({}) fetch {} {:?}", inner.account, direction, cursor);

        inner.fetch(cursor, count)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use socialhub_paging::{DateRange, PageCursor, PageNumber, SinceIdPage, TokenCursor};
    use socialhub_types::{AccountRef, Direction, ItemId, ServiceType};

    use crate::{Backend, BackendError};

    use super::{MockBackend, MockScheme};

    fn backend(scheme: MockScheme) -> MockBackend {
        let backend = MockBackend::new(AccountRef::new(ServiceType::Slack, "C024BE91L"), scheme);

        for id in 1..=6 {
            backend.post(id, Utc.timestamp_opt(id as i64, 0).unwrap());
        }

        backend
    }

    fn ids(values: &[u64]) -> Vec<ItemId> {
        values.iter().copied().map(ItemId::from).collect()
    }

    async fn fetch(backend: &MockBackend, cursor: Option<PageCursor>) -> Vec<ItemId> {
        backend
            .fetch(cursor, Direction::Forward, Some(2))
            .await
            .unwrap()
            .items()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[async_std::test]
    async fn test_token() {
        let backend = backend(MockScheme::Token);

        let page = backend.fetch(None, Direction::Forward, Some(2)).await.unwrap();

        assert_eq!(
            page.cursor(),
            &PageCursor::Token(TokenCursor::new(Some("newer:6"), None::<&str>, Some("older:5")))
        );

        assert_eq!(
            fetch(&backend, Some(TokenCursor::at("older:5").into())).await,
            ids(&[4, 3])
        );

        assert_eq!(
            fetch(&backend, Some(TokenCursor::at("newer:2").into())).await,
            ids(&[4, 3])
        );
    }

    #[async_std::test]
    async fn test_date_range() {
        let backend = backend(MockScheme::DateRange);

        assert_eq!(
            fetch(&backend, Some(DateRange::older_than("5", false).into())).await,
            ids(&[4, 3])
        );

        assert_eq!(
            fetch(&backend, Some(DateRange::older_than("5", true).into())).await,
            ids(&[5, 4])
        );

        assert_eq!(
            fetch(&backend, Some(DateRange::newer_than("2", false).into())).await,
            ids(&[4, 3])
        );

        assert_eq!(
            fetch(&backend, Some(DateRange::newer_than("6", false).into())).await,
            ids(&[])
        );
    }

    #[async_std::test]
    async fn test_page_and_since_id() {
        let backend = backend(MockScheme::Page);

        assert_eq!(
            fetch(&backend, Some(PageNumber::new(2).into())).await,
            ids(&[4, 3])
        );

        assert_eq!(fetch(&backend, Some(PageNumber::new(9).into())).await, ids(&[]));

        let backend = self::backend(MockScheme::SinceIdPage);

        let cursor = SinceIdPage {
            since_id: None,
            page: Some(3),
        };

        assert_eq!(fetch(&backend, Some(cursor.into())).await, ids(&[2, 1]));
    }

    #[async_std::test]
    async fn test_failures() {
        let backend = backend(MockScheme::Page);

        backend.fail_next(BackendError::Network("connection reset".to_owned()));

        let err = backend
            .fetch(None, Direction::Forward, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BackendError>(),
            Some(BackendError::Network(_))
        ));

        let err = backend
            .fetch(Some(TokenCursor::at("x").into()), Direction::Forward, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BackendError>(),
            Some(BackendError::NotImplemented(_))
        ));

        assert_eq!(backend.requests().len(), 2);
    }
}
