//! Record identifiers and sharded-path utilities.
//!
//! Every stored article and case study is keyed by an identifier assigned by the content store
//! at creation time. The store uses a *canonical* UUID representation for these identifiers:
//! **32 lowercase hexadecimal characters** (no hyphens), the same value you would get from
//! `Uuid::new_v4().simple().to_string()`.
//!
//! Canonical form is *required* for externally supplied identifiers (CLI arguments, API paths).
//! Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected.
//!
//! ## Sharded directory layout
//! For a canonical identifier `u`, a record lives under:
//! `table_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `content_data/portfolio/55/0e/550e8400e29b41d4a716446655440000/record.yaml`

use crate::error::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Canonical record identifier (32 lowercase hex characters, no hyphens).
///
/// Once constructed, the contained UUID is guaranteed to be valid and is always displayed in
/// canonical form. Ordering follows the underlying UUID and is only used to break ties between
/// records created at the same instant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Generates a new random identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an identifier that must already be in canonical form.
    ///
    /// This does **not** normalise other common UUID forms (hyphenated or uppercase).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> StoreResult<Self> {
        if Self::is_canonical(input) {
            return Uuid::parse_str(input)
                .map(Self)
                .map_err(|e| StoreError::InvalidInput(e.to_string()));
        }
        Err(StoreError::InvalidInput(format!(
            "identifier must be 32 lowercase hex characters without hyphens, got: '{}'",
            input
        )))
    }

    /// Returns true if `input` is in canonical form.
    ///
    /// Purely syntactic: exactly 32 bytes, each one of `0-9` or `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns `parent_dir/<s1>/<s2>/<id>/` where `s1`/`s2` are the first two pairs of hex
    /// characters of this identifier.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ContentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentId::parse(s)
    }
}

impl serde::Serialize for ContentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ContentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContentId::parse(&s).map_err(serde::de::Error::custom)
    }
}
