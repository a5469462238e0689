//! # ArtWeb Core
//!
//! Core content logic for the ArtWeb agency website.
//!
//! This crate contains pure data operations and file/folder management:
//! - Article (blog post) and case study (portfolio item) records
//! - Slug generation for article URLs
//! - The filter reconciler shared by every list screen (free-text query + category)
//! - A file-backed content store with sharded YAML records under `CONTENT_DATA_DIR`
//!
//! **No API concerns**: HTTP servers, CLI parsing, or response shaping belong in `api-rest`,
//! `api-shared`, or `cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod id;
pub mod listing;
pub mod models;
pub mod repositories;
pub mod slug;
pub mod stats;

pub use config::CoreConfig;
pub use constants::DEFAULT_CONTENT_DATA_DIR;
pub use error::{StoreError, StoreResult};
pub use filter::{CategoryFilter, FilterState, Searchable};
pub use id::ContentId;
pub use listing::{ListScreen, ResultSummary};
pub use models::{Article, ArticleDraft, CaseStudy, CaseStudyDraft, ContentTable, Record};
pub use repositories::{ContentStore, FileContentStore, RecordKey, Visibility};
pub use slug::slugify;
pub use stats::ContentStats;
