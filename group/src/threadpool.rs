use futures::{future::RemoteHandle, task::SpawnExt, Future};
use once_cell::sync::OnceCell;

/// Spawn `fut` on the process wide pool.
///
/// Dropping the returned handle cancels the task.
pub fn run_background<Fut>(fut: Fut) -> anyhow::Result<RemoteHandle<Fut::Output>>
where
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    use futures::executor::ThreadPool;

    static THREAD_POOL: OnceCell<ThreadPool> = OnceCell::new();

    let pool = THREAD_POOL.get_or_try_init(ThreadPool::new)?;

    Ok(pool.spawn_with_handle(fut)?)
}
