//! Record directory utilities.
//!
//! This module contains functions for allocating, walking and writing the sharded record
//! directories of a table.

use crate::constants::{MAX_ALLOCATION_ATTEMPTS, RECORD_FILENAME, RECORD_TMP_FILENAME};
use crate::id::ContentId;
use crate::{StoreError, StoreResult};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// Creates a unique record directory within a table directory.
///
/// Identifiers come from `id_source`; a collision with an existing directory (or one created
/// concurrently by something else) is retried with a new identifier, up to
/// [`MAX_ALLOCATION_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns `StoreError::RecordDirCreation` if:
/// - creating a shard directory fails,
/// - no free identifier was found within the retry budget.
pub(crate) fn create_unique_record_dir(
    table_dir: &Path,
    mut id_source: impl FnMut() -> ContentId,
) -> StoreResult<(ContentId, PathBuf)> {
    for _attempt in 0..MAX_ALLOCATION_ATTEMPTS {
        let id = id_source();
        let candidate = id.sharded_dir(table_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(StoreError::RecordDirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((id, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(StoreError::RecordDirCreation(e)),
        }
    }

    Err(StoreError::RecordDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        format!(
            "failed to allocate a unique record directory after {} attempts",
            MAX_ALLOCATION_ATTEMPTS
        ),
    )))
}

/// Paths of every `record.yaml` under `table_dir/<s1>/<s2>/<id>/`.
///
/// A missing table directory means an empty table. Unreadable shard directories are skipped
/// with a warning; only a failure to read the table directory itself is an error.
pub(crate) fn record_files(table_dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let s1_iter = match fs::read_dir(table_dir) {
        Ok(it) => it,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::FileRead(e)),
    };

    let mut files = Vec::new();
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(e) => {
                tracing::warn!("skipping shard {}: {}", s1_path.display(), e);
                continue;
            }
        };

        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(e) => {
                    tracing::warn!("skipping shard {}: {}", s2_path.display(), e);
                    continue;
                }
            };

            for id_ent in id_iter.flatten() {
                let record_path = id_ent.path().join(RECORD_FILENAME);
                if record_path.is_file() {
                    files.push(record_path);
                }
            }
        }
    }

    Ok(files)
}

/// Writes `content` as the record file of `record_dir`.
///
/// The content goes to a temporary file first and is renamed into place, so readers never
/// observe a half-written record.
pub(crate) fn write_record_file(record_dir: &Path, content: &str) -> StoreResult<()> {
    let tmp_path = record_dir.join(RECORD_TMP_FILENAME);
    fs::write(&tmp_path, content).map_err(StoreError::FileWrite)?;
    fs::rename(&tmp_path, record_dir.join(RECORD_FILENAME)).map_err(StoreError::FileWrite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_unique_record_dir_retries_on_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let taken = ContentId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let free = ContentId::parse("00112233445566778899aabbccddeeff").unwrap();
        fs::create_dir_all(taken.sharded_dir(temp_dir.path())).unwrap();

        let mut ids = vec![free.clone(), taken.clone()];
        let (id, dir) = create_unique_record_dir(temp_dir.path(), || ids.pop().unwrap()).unwrap();

        assert_eq!(id, free);
        assert!(dir.is_dir());
        assert_eq!(dir, free.sharded_dir(temp_dir.path()));
    }

    #[test]
    fn test_create_unique_record_dir_gives_up() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let taken = ContentId::parse("550e8400e29b41d4a716446655440000").unwrap();
        fs::create_dir_all(taken.sharded_dir(temp_dir.path())).unwrap();

        let result = create_unique_record_dir(temp_dir.path(), || taken.clone());
        assert!(matches!(result, Err(StoreError::RecordDirCreation(_))));
    }

    #[test]
    fn test_record_files_missing_table_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let files = record_files(&temp_dir.path().join("blog_posts")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_record_files_table_path_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let table = temp_dir.path().join("blog_posts");
        fs::write(&table, "not a directory").unwrap();

        assert!(matches!(record_files(&table), Err(StoreError::FileRead(_))));
    }

    #[test]
    fn test_write_record_file_replaces_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_record_file(temp_dir.path(), "title: first\n").unwrap();
        write_record_file(temp_dir.path(), "title: second\n").unwrap();

        let content = fs::read_to_string(temp_dir.path().join(RECORD_FILENAME)).unwrap();
        assert_eq!(content, "title: second\n");
        assert!(!temp_dir.path().join(RECORD_TMP_FILENAME).exists());

        let files = record_files(temp_dir.path()).unwrap();
        assert!(files.is_empty(), "record at the table root is not sharded");
    }
}
