use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

use chrono::{DateTime, Utc};
use futures::{future::join_all, Future};
use socialhub_account::{AccountPager, Backend, FetchError};
use socialhub_paging::PageResult;
use socialhub_types::{AccountRef, Direction, Identify, Timestamped};

use crate::{merge, threadpool::run_background, GroupConfig, GroupError};

/// Immutable snapshot of many accounts paged as one timeline.
///
/// Every account appears at most once. Advancing never mutates a snapshot,
/// it returns a new one in [`GroupAdvance`].
pub struct AggregationGroup<T> {
    pagers: BTreeMap<AccountRef, AccountPager<T>>,
}

impl<T> Clone for AggregationGroup<T> {
    fn clone(&self) -> Self {
        Self {
            pagers: self.pagers.clone(),
        }
    }
}

impl<T> Default for AggregationGroup<T> {
    fn default() -> Self {
        Self {
            pagers: Default::default(),
        }
    }
}

impl<T: Debug> Debug for AggregationGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.pagers.iter()).finish()
    }
}

/// Outcome of one group wide advance.
#[derive(Debug)]
pub struct GroupAdvance<T> {
    /// Snapshot with every successful account replaced and every failed one kept.
    pub group: AggregationGroup<T>,
    /// Fresh items of the successful accounts, newest first.
    pub items: Vec<T>,
    /// One entry per failed account.
    pub errors: Vec<FetchError>,
}

impl<T> GroupAdvance<T> {
    /// Returns true if no account failed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<T> AggregationGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pagers<I>(pagers: I) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = AccountPager<T>>,
    {
        let mut group = Self::new();

        for pager in pagers {
            group.try_insert(pager)?;
        }

        Ok(group)
    }

    /// Build group from already fetched pages.
    pub fn seed<I>(entries: I) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = (AccountRef, Arc<dyn Backend<T>>, PageResult<T>)>,
    {
        Self::from_pagers(
            entries
                .into_iter()
                .map(|(account, backend, current)| AccountPager::new(account, backend, current)),
        )
    }

    /// Apply fetch options of `config` to every account.
    pub fn with_config(self, config: &GroupConfig) -> Self {
        let pagers = self
            .pagers
            .into_iter()
            .map(|(account, pager)| {
                let options = config.options_for(&account);
                (account, pager.with_options(options))
            })
            .collect();

        Self { pagers }
    }

    fn try_insert(&mut self, pager: AccountPager<T>) -> Result<(), GroupError> {
        if self.pagers.contains_key(pager.account()) {
            return Err(GroupError::DuplicateAccount(pager.account().clone()));
        }

        self.pagers.insert(pager.account().clone(), pager);

        Ok(())
    }

    /// Returns a new snapshot containing `pager`.
    pub fn insert(&self, pager: AccountPager<T>) -> Result<Self, GroupError> {
        let mut group = self.clone();

        group.try_insert(pager)?;

        Ok(group)
    }

    /// Returns a new snapshot without `account`.
    pub fn remove(&self, account: &AccountRef) -> Self {
        let mut group = self.clone();

        group.pagers.remove(account);

        group
    }

    pub fn get(&self, account: &AccountRef) -> Option<&PageResult<T>> {
        self.pagers.get(account).map(AccountPager::current)
    }

    pub fn pager(&self, account: &AccountRef) -> Option<&AccountPager<T>> {
        self.pagers.get(account)
    }

    /// Accounts with their current pages, ordered by account.
    pub fn entries(&self) -> impl Iterator<Item = (&AccountRef, &PageResult<T>)> {
        self.pagers
            .iter()
            .map(|(account, pager)| (account, pager.current()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountRef> {
        self.pagers.keys()
    }

    pub fn len(&self) -> usize {
        self.pagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pagers.is_empty()
    }
}

impl<T: Timestamped> AggregationGroup<T> {
    /// Creation time of the newest item held by any account.
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.timestamps().max()
    }

    /// Creation time of the oldest item held by any account.
    pub fn oldest(&self) -> Option<DateTime<Utc>> {
        self.timestamps().min()
    }

    fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.entries()
            .flat_map(|(_, page)| page.items().iter().map(Timestamped::created_at))
    }
}

impl<T: Clone + Identify + Timestamped> AggregationGroup<T> {
    /// Merged view of every account's current page.
    pub fn items(&self) -> Vec<T> {
        merge(self.entries().map(|(account, page)| (account, page.items())))
    }

    fn settle(
        mut pagers: BTreeMap<AccountRef, AccountPager<T>>,
        outcomes: Vec<Result<AccountPager<T>, FetchError>>,
    ) -> GroupAdvance<T> {
        let mut fresh = vec![];
        let mut errors = vec![];

        for outcome in outcomes {
            match outcome {
                Ok(pager) => {
                    let unchanged = pagers
                        .get(pager.account())
                        .map_or(false, |previous| previous.same_page(&pager));

                    if !unchanged {
                        pagers.insert(pager.account().clone(), pager.clone());
                        fresh.push(pager);
                    }
                }
                Err(err) => {
                    log::warn!("{}", err);
                    errors.push(err);
                }
            }
        }

        let items = merge(
            fresh
                .iter()
                .map(|pager| (pager.account(), pager.current().items())),
        );

        GroupAdvance {
            group: Self { pagers },
            items,
            errors,
        }
    }
}

impl<T> AggregationGroup<T>
where
    T: Clone + Identify + Timestamped + Send + Sync + 'static,
{
    /// Load the newest page of every account concurrently.
    ///
    /// Accounts failing their initial fetch are left out of the group and
    /// reported in [`GroupAdvance::errors`].
    pub async fn load<I>(accounts: I, config: &GroupConfig) -> Result<GroupAdvance<T>, GroupError>
    where
        I: IntoIterator<Item = (AccountRef, Arc<dyn Backend<T>>)>,
    {
        let mut backends = BTreeMap::new();

        for (account, backend) in accounts {
            if backends.contains_key(&account) {
                return Err(GroupError::DuplicateAccount(account));
            }

            backends.insert(account, backend);
        }

        log::debug!("load group of {} accounts", backends.len());

        let tasks = backends.into_iter().map(|(account, backend)| {
            let options = config.options_for(&account);

            dispatch(account.clone(), AccountPager::load(account, backend, options))
        });

        let outcomes = join_all(tasks).await;

        Ok(Self::settle(BTreeMap::new(), outcomes))
    }

    /// Advance every account one page in `direction` concurrently.
    ///
    /// Never fails as a whole: failed accounts keep their previous page in
    /// the returned snapshot.
    pub async fn advance(&self, direction: Direction) -> GroupAdvance<T> {
        log::debug!("advance group of {} accounts {}", self.len(), direction);

        let tasks = self.pagers.values().map(|pager| {
            let pager = pager.clone();

            dispatch(pager.account().clone(), async move {
                pager.advance(direction).await
            })
        });

        let outcomes = join_all(tasks).await;

        Self::settle(self.pagers.clone(), outcomes)
    }

    /// Step every account toward newer items.
    pub async fn advance_forward(&self) -> GroupAdvance<T> {
        self.advance(Direction::Forward).await
    }

    /// Step every account toward older items.
    pub async fn advance_backward(&self) -> GroupAdvance<T> {
        self.advance(Direction::Backward).await
    }
}

/// Run one account's request on the shared pool.
async fn dispatch<O, Fut>(account: AccountRef, fut: Fut) -> Result<O, FetchError>
where
    Fut: Future<Output = Result<O, FetchError>> + Send + 'static,
    O: Send + 'static,
{
    match run_background(fut) {
        Ok(handle) => handle.await,
        Err(err) => {
            log::error!("account({}) dispatch failed, {}", account, err);

            Err(FetchError::new(account, err))
        }
    }
}
