use async_trait::async_trait;
use socialhub_paging::{PageCursor, PageResult};
use socialhub_types::Direction;

/// Abstract of one backend's timeline endpoint, e.g, **Mastodon home timeline**
///
/// Adapters map the cursor onto their own request parameters and map the
/// response back into a [`PageResult`], filling backend provided cursor
/// state (tokens, echoed ranges) into the returned cursor.
#[async_trait]
pub trait Backend<T>: Send + Sync {
    /// Fetch one batch.
    /// - `cursor` [`None`] requests the newest page.
    /// - `count` requested batch size, backend default when [`None`].
    ///
    /// Failures should be reported as [`BackendError`](crate::BackendError)
    /// where the cause is known, any other error is kept as
    /// [`Other`](crate::BackendError::Other).
    async fn fetch(
        &self,
        cursor: Option<PageCursor>,
        direction: Direction,
        count: Option<u32>,
    ) -> anyhow::Result<PageResult<T>>;
}
