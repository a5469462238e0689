//! Filter reconciler for list screens.
//!
//! Every list screen (blog listing, portfolio listing) narrows an already-fetched collection
//! with two independent predicates:
//!
//! - a free-text **query**: case-insensitive substring match against a fixed set of searchable
//!   fields per record kind, OR-ed across fields; the empty query matches everything
//! - a **category** selector: either `"all"` or an exact, case-sensitive category value
//!
//! The two predicates are AND-ed. The output is always a sub-sequence of the input in the same
//! relative order, and is recomputed from scratch on every change. Nothing here performs I/O or
//! can fail.
//!
//! The category universe is derived from the collection itself; categories are free-form text
//! on the records, so there is no configured list.
//!
//! Queries are matched literally. Leading and trailing whitespace is *not* trimmed, so a query
//! of `" "` only matches records containing a space in a searchable field.

use crate::constants::ALL_CATEGORIES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A record that list screens can search and group by category.
pub trait Searchable {
    /// Text fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Category value, compared exactly.
    fn category(&self) -> &str;
}

/// Category constraint of a filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No constraint.
    #[default]
    All,
    /// Only records whose category equals this value.
    Only(String),
}

impl CategoryFilter {
    /// Parses a selector value; the literal `"all"` means no constraint.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_owned())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Selector value as shown in a category picker.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(selected) => selected,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::parse(value)
    }
}

/// The (query, category) pair driving a list screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    /// True when neither predicate constrains the output.
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty() && self.category == CategoryFilter::All
    }

    /// Whether `item` passes both predicates.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        QueryMatcher::new(&self.query).matches(item) && self.category.matches(item.category())
    }
}

/// Lowercased query, computed once per reconcile pass.
struct QueryMatcher {
    needle: Option<String>,
}

impl QueryMatcher {
    fn new(query: &str) -> Self {
        Self {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches<T: Searchable>(&self, item: &T) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => item
                .search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Whether `item` matches the free-text `query`.
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    QueryMatcher::new(query).matches(item)
}

/// Indices of the items of `collection` passing `filter`, ascending.
pub fn visible_indices<T: Searchable>(collection: &[T], filter: &FilterState) -> Vec<usize> {
    if filter.is_unconstrained() {
        return (0..collection.len()).collect();
    }

    let query = QueryMatcher::new(&filter.query);
    collection
        .iter()
        .enumerate()
        .filter(|(_, item)| query.matches(*item) && filter.category.matches(item.category()))
        .map(|(index, _)| index)
        .collect()
}

/// The visible subset of `collection` under `filter`, in original order.
pub fn reconcile<'a, T: Searchable>(collection: &'a [T], filter: &FilterState) -> Vec<&'a T> {
    visible_indices(collection, filter)
        .into_iter()
        .map(|index| &collection[index])
        .collect()
}

/// Distinct categories present in `collection`, in order of first appearance.
pub fn distinct_categories<T: Searchable>(collection: &[T]) -> Vec<String> {
    let mut seen = Vec::<&str>::new();
    for item in collection {
        let category = item.category();
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen.into_iter().map(str::to_owned).collect()
}

/// Number of records for one category tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Per-category record counts, plus the `"all"` total.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub categories: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Count for a selector value; `"all"` gives the total, unknown categories give 0.
    pub fn count_for(&self, selector: &CategoryFilter) -> usize {
        match selector {
            CategoryFilter::All => self.all,
            CategoryFilter::Only(selected) => self
                .categories
                .iter()
                .find(|c| &c.category == selected)
                .map_or(0, |c| c.count),
        }
    }
}

/// Counts records per category, categories in order of first appearance.
pub fn category_counts<T: Searchable>(collection: &[T]) -> CategoryCounts {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in collection {
        *counts.entry(item.category()).or_default() += 1;
    }

    let categories = distinct_categories(collection)
        .into_iter()
        .map(|category| {
            let count = counts.get(category.as_str()).copied().unwrap_or_default();
            CategoryCount { category, count }
        })
        .collect();

    CategoryCounts {
        all: collection.len(),
        categories,
    }
}
