//! Constants used throughout the ArtWeb core crate.
//!
//! This module contains all path, filename and default-value constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for content storage when no explicit directory is configured.
pub const DEFAULT_CONTENT_DATA_DIR: &str = "content_data";

/// Table (directory) name for blog articles.
pub const ARTICLES_TABLE: &str = "blog_posts";

/// Table (directory) name for portfolio case studies.
pub const CASE_STUDIES_TABLE: &str = "portfolio";

/// Filename of a stored record inside its sharded directory.
pub const RECORD_FILENAME: &str = "record.yaml";

/// Temporary filename used while a record is being replaced.
pub const RECORD_TMP_FILENAME: &str = "record.yaml.tmp";

/// Category selector value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// Author used when an article draft leaves the author blank.
pub const DEFAULT_AUTHOR: &str = "Admin ArtWeb";

/// Estimated read time, in minutes, for a new article draft.
pub const DEFAULT_READ_TIME_MINUTES: u32 = 5;

/// Team size for a new case study draft.
pub const DEFAULT_TEAM_SIZE: u32 = 1;

/// Number of records shown by the "recent" home page sections.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Attempts made to allocate a fresh record directory before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;
