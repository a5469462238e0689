//! List screens.
//!
//! A [`ListScreen`] owns one fetched collection and one [`FilterState`], and keeps the visible
//! subset in step with both. It is created explicitly at screen entry with [`ListScreen::load`],
//! which issues a single fetch; a failed fetch is logged and leaves the screen with an empty
//! collection instead of surfacing the error.
//!
//! Screens never share state, and there is no cache between them: entering a screen again
//! issues a fresh fetch.

use crate::filter::{self, CategoryCounts, CategoryFilter, FilterState, Searchable};
use crate::models::Record;
use crate::repositories::ContentStore;
use crate::StoreResult;
use serde::{Deserialize, Serialize};

/// "Showing `shown` of `total`" figures for a list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub shown: usize,
    pub total: usize,
}

/// One list screen instance.
#[derive(Clone, Debug)]
pub struct ListScreen<T> {
    collection: Vec<T>,
    filter: FilterState,
    visible: Vec<usize>,
}

impl<T: Searchable> Default for ListScreen<T> {
    fn default() -> Self {
        Self::with_collection(Vec::new())
    }
}

impl<T: Searchable> ListScreen<T> {
    /// Screen over an already-fetched collection, with no filter applied.
    pub fn with_collection(collection: Vec<T>) -> Self {
        let mut screen = Self {
            collection,
            filter: FilterState::default(),
            visible: Vec::new(),
        };
        screen.recompute();
        screen
    }

    /// Builds a screen from the outcome of a fetch.
    ///
    /// A failed fetch is logged and gives an empty collection.
    pub fn from_fetch(fetched: StoreResult<Vec<T>>) -> Self {
        match fetched {
            Ok(collection) => Self::with_collection(collection),
            Err(e) => {
                tracing::error!("failed to load collection: {}", e);
                Self::default()
            }
        }
    }

    /// Replaces the collection with the outcome of a new fetch.
    ///
    /// On failure the previous collection is kept and the error is logged.
    pub fn apply_fetch(&mut self, fetched: StoreResult<Vec<T>>) {
        match fetched {
            Ok(collection) => self.set_collection(collection),
            Err(e) => tracing::error!("failed to refresh collection: {}", e),
        }
    }

    pub fn set_collection(&mut self, collection: Vec<T>) {
        self.collection = collection;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.recompute();
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.filter.category = category.into();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.recompute();
    }

    /// Clears the query and selects every category.
    pub fn reset_filters(&mut self) {
        self.set_filter(FilterState::default());
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The full fetched collection, unfiltered.
    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    /// The visible subset, in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(|&index| &self.collection[index])
    }

    /// Categories selectable on this screen, besides `"all"`.
    pub fn categories(&self) -> Vec<String> {
        filter::distinct_categories(&self.collection)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        filter::category_counts(&self.collection)
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            shown: self.visible.len(),
            total: self.collection.len(),
        }
    }

    pub fn into_visible(self) -> Vec<T> {
        let Self {
            collection,
            visible,
            ..
        } = self;
        collection
            .into_iter()
            .enumerate()
            .filter(|(index, _)| visible.binary_search(index).is_ok())
            .map(|(_, item)| item)
            .collect()
    }

    fn recompute(&mut self) {
        self.visible = filter::visible_indices(&self.collection, &self.filter);
    }
}

impl<T: Record + Searchable> ListScreen<T> {
    /// Fetches the publicly visible records from `store` and opens a screen over them.
    pub fn load<S>(store: &S) -> Self
    where
        S: ContentStore<Item = T> + ?Sized,
    {
        tracing::debug!("loading {} list screen", T::TABLE);
        Self::from_fetch(store.fetch_published())
    }

    /// Re-fetches from `store`, keeping the current filter.
    pub fn refresh<S>(&mut self, store: &S)
    where
        S: ContentStore<Item = T> + ?Sized,
    {
        self.apply_fetch(store.fetch_published());
    }
}
