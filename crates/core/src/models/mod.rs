//! Content record types.
//!
//! Two record kinds live in the content store:
//! - [`Article`]: a blog post, hidden from readers until published.
//! - [`CaseStudy`]: a portfolio project, public as soon as it exists.
//!
//! Each kind has a matching draft type ([`ArticleDraft`], [`CaseStudyDraft`]) carrying the
//! editable fields. Drafts are validated and normalised exactly once, when the store turns them
//! into records; everything past that boundary can rely on the record invariants.

mod article;
mod case_study;

pub use article::{Article, ArticleDraft};
pub use case_study::{CaseStudy, CaseStudyDraft};

use crate::constants::{ARTICLES_TABLE, CASE_STUDIES_TABLE};
use crate::id::ContentId;
use crate::StoreResult;
use artweb_types::{NonEmptyText, TextError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// The record collections held by the content store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentTable {
    Articles,
    CaseStudies,
}

impl ContentTable {
    pub const ALL: [ContentTable; 2] = [ContentTable::Articles, ContentTable::CaseStudies];

    /// Storage name of the table.
    pub fn name(self) -> &'static str {
        match self {
            ContentTable::Articles => ARTICLES_TABLE,
            ContentTable::CaseStudies => CASE_STUDIES_TABLE,
        }
    }
}

impl fmt::Display for ContentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record kind the content store can hold.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Editable input used for create and full-record update.
    type Draft: Send;

    const TABLE: ContentTable;

    fn id(&self) -> &ContentId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Whether public readers may see this record.
    fn is_public(&self) -> bool;

    /// Secondary key that must be unique within the table, if the kind has one.
    fn slug(&self) -> Option<&str> {
        None
    }

    /// Validates `draft` and builds the stored record.
    ///
    /// `created_at` is the original creation time on update and `updated_at` on insert.
    fn from_draft(
        id: ContentId,
        draft: Self::Draft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Self>;
}

/// Validates a required text field, naming it in the error.
pub(crate) fn required(field: &str, value: &str) -> StoreResult<String> {
    NonEmptyText::new(value)
        .map(NonEmptyText::into_inner)
        .map_err(|e: TextError| crate::StoreError::InvalidInput(format!("{field}: {e}")))
}
