//! Store: the active filter list plus its default set, with change
//! notification.
//!
//! The store is the single owner of the active list; the UI reads from it and
//! writes to it only through [`FilterStore::filter_changed`],
//! [`FilterStore::filter_removed`] and [`FilterStore::reset`]. Every update is
//! published on a [`tokio::sync::watch`] channel, so any number of readers can
//! [`subscribe`](FilterStore::subscribe) and see the latest list. No runtime is
//! required: publishing and borrowing are synchronous.

use crate::filter::Filter;
use crate::list;
use crate::query::to_query;
use tokio::sync::watch;

/// Subscription handle returned by [`FilterStore::subscribe`].
pub type FilterReceiver = watch::Receiver<Vec<Filter>>;

pub struct FilterStore {
    tx: watch::Sender<Vec<Filter>>,
    defaults: Vec<Filter>,
}

impl FilterStore {
    /// Create a store whose active list starts as a copy of `defaults`.
    pub fn new(defaults: Vec<Filter>) -> Self {
        let (tx, _rx) = watch::channel(defaults.clone());
        Self { tx, defaults }
    }

    /// Create a store seeded with `filters` but resetting to `defaults`.
    pub fn with_filters(defaults: Vec<Filter>, filters: Vec<Filter>) -> Self {
        let (tx, _rx) = watch::channel(list::process_filter_rules(filters));
        Self { tx, defaults }
    }

    pub fn defaults(&self) -> &[Filter] {
        &self.defaults
    }

    /// A copy of the active list.
    pub fn filters(&self) -> Vec<Filter> {
        self.tx.borrow().clone()
    }

    /// The active list rendered as a query string.
    pub fn query(&self) -> String {
        to_query(&self.tx.borrow())
    }

    /// Receive every future update to the active list.
    pub fn subscribe(&self) -> FilterReceiver {
        self.tx.subscribe()
    }

    /// Merge an edited filter into the active list.
    pub fn filter_changed(&self, updated: Filter) {
        self.publish(|current| list::filter_changed(current, updated));
    }

    /// Remove a filter (restoring it if it is a default), or with `None`
    /// reset the whole list.
    pub fn filter_removed(&self, removed: Option<&Filter>) {
        let defaults = &self.defaults;
        self.publish(|current| list::filter_removed(current, defaults, removed));
    }

    /// Reset the active list to the default set.
    pub fn reset(&self) {
        self.filter_removed(None);
    }

    fn publish(&self, update: impl FnOnce(Vec<Filter>) -> Vec<Filter>) {
        self.tx.send_modify(|filters| {
            let current = std::mem::take(filters);
            *filters = update(current);
        });
        tracing::debug!(
            filters = self.tx.borrow().len(),
            subscribers = self.tx.receiver_count(),
            "filter store published"
        );
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(list::default_filters(true))
    }
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("filters", &*self.tx.borrow())
            .field("defaults", &self.defaults)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
