//! Content store access.
//!
//! [`ContentStore`] is the contract the rest of the system consumes: fetch a collection
//! (optionally publish-gated, newest first), look up one record, and the create / full update /
//! delete operations used by the CMS. [`FileContentStore`] implements it on top of sharded YAML
//! files.

mod file;
pub(crate) mod helpers;

pub use file::FileContentStore;

use crate::id::ContentId;
use crate::models::Record;
use crate::StoreResult;
use std::fmt;

/// Which records a read may return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Only records public readers may see (published articles, every case study).
    Public,
    /// Every record, drafts included. Used by the CMS.
    Any,
}

impl Visibility {
    pub fn admits<R: Record>(self, record: &R) -> bool {
        match self {
            Visibility::Public => record.is_public(),
            Visibility::Any => true,
        }
    }
}

/// Single-record lookup key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKey {
    Id(ContentId),
    Slug(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "id={}", id),
            RecordKey::Slug(slug) => write!(f, "slug={}", slug),
        }
    }
}

/// Access to one record collection.
///
/// Reads return records ordered by creation time, newest first. Failures surface as
/// [`StoreError`](crate::StoreError); nothing here retries.
pub trait ContentStore: Send + Sync {
    type Item: Record;

    /// Every record admitted by `visibility`, newest first.
    fn fetch(&self, visibility: Visibility) -> StoreResult<Vec<Self::Item>>;

    /// One record by key, or `StoreError::NotFound`.
    fn fetch_one(&self, key: &RecordKey, visibility: Visibility) -> StoreResult<Self::Item>;

    /// Validates `draft`, assigns an identifier and stores the new record.
    fn insert(&self, draft: <Self::Item as Record>::Draft) -> StoreResult<Self::Item>;

    /// Replaces every editable field of an existing record. `created_at` is preserved.
    fn update(
        &self,
        id: &ContentId,
        draft: <Self::Item as Record>::Draft,
    ) -> StoreResult<Self::Item>;

    fn delete(&self, id: &ContentId) -> StoreResult<()>;

    /// Records public readers may see, newest first.
    fn fetch_published(&self) -> StoreResult<Vec<Self::Item>> {
        self.fetch(Visibility::Public)
    }

    /// Every record, drafts included, newest first.
    fn fetch_all(&self) -> StoreResult<Vec<Self::Item>> {
        self.fetch(Visibility::Any)
    }

    /// The `limit` newest public records.
    fn fetch_recent(&self, limit: usize) -> StoreResult<Vec<Self::Item>> {
        let mut records = self.fetch_published()?;
        records.truncate(limit);
        Ok(records)
    }
}

/// Sorts newest first, breaking ties by identifier.
pub(crate) fn sort_newest_first<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}
