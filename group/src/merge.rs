use std::cmp::Ordering;

use socialhub_types::{AccountRef, Identify, Timestamped};

/// Merge per account batches into one newest first timeline.
///
/// Items are ordered by creation time, ties by account then item id, so the
/// result doesn't depend on which account answered first. Nothing is
/// de-duplicated: accounts never share item identities.
pub fn merge<'a, T, I>(pages: I) -> Vec<T>
where
    T: Clone + Identify + Timestamped + 'a,
    I: IntoIterator<Item = (&'a AccountRef, &'a [T])>,
{
    let mut tagged = pages
        .into_iter()
        .flat_map(|(account, items)| items.iter().map(move |item| (account, item)))
        .collect::<Vec<_>>();

    tagged.sort_by(|lhs, rhs| newest_first(*lhs, *rhs));

    tagged.into_iter().map(|(_, item)| item.clone()).collect()
}

fn newest_first<T: Identify + Timestamped>(lhs: (&AccountRef, &T), rhs: (&AccountRef, &T)) -> Ordering {
    rhs.1
        .created_at()
        .cmp(&lhs.1.created_at())
        .then_with(|| lhs.0.cmp(rhs.0))
        .then_with(|| lhs.1.id().cmp(&rhs.1.id()))
}
