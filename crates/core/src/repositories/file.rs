//! File-backed content store.
//!
//! ## Storage Layout
//!
//! Each table is a directory under the content data directory, and each record is a YAML file
//! in a sharded directory named after its identifier:
//!
//! ```text
//! content_data/
//!   blog_posts/
//!     <s1>/<s2>/<id>/record.yaml
//!   portfolio/
//!     <s1>/<s2>/<id>/record.yaml
//! ```
//!
//! Reads walk the table on every call; there is no cache. Writes take a per-store lock so that
//! the slug uniqueness check and the write that depends on it cannot interleave with another
//! write. A full-record update simply replaces the file: the last write wins.

use super::helpers::{create_unique_record_dir, record_files, write_record_file};
use super::{sort_newest_first, ContentStore, RecordKey, Visibility};
use crate::config::CoreConfig;
use crate::constants::RECORD_FILENAME;
use crate::id::ContentId;
use crate::models::Record;
use crate::{StoreError, StoreResult};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Content store for records of kind `R`, persisted as YAML files.
#[derive(Debug)]
pub struct FileContentStore<R> {
    cfg: Arc<CoreConfig>,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FileContentStore<R> {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    fn table_dir(&self) -> PathBuf {
        self.cfg.table_dir(R::TABLE)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(key: impl ToString) -> StoreError {
        StoreError::NotFound {
            table: R::TABLE.name(),
            key: key.to_string(),
        }
    }

    fn parse_record(path: &Path) -> StoreResult<R> {
        let contents = fs::read_to_string(path).map_err(StoreError::FileRead)?;
        serde_yaml::from_str(&contents).map_err(StoreError::YamlDeserialization)
    }

    /// Every readable record of the table, unordered.
    ///
    /// Records that fail to parse are logged and skipped.
    fn read_all(&self) -> StoreResult<Vec<R>> {
        let mut records = Vec::new();
        for path in record_files(&self.table_dir())? {
            match Self::parse_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("failed to parse record {}: {}", path.display(), e),
            }
        }
        Ok(records)
    }

    fn read_by_id(&self, id: &ContentId) -> StoreResult<R> {
        let path = id.sharded_dir(&self.table_dir()).join(RECORD_FILENAME);
        match Self::parse_record(&path) {
            Err(StoreError::FileRead(e)) if e.kind() == ErrorKind::NotFound => {
                Err(Self::not_found(RecordKey::Id(id.clone())))
            }
            other => other,
        }
    }

    fn write(&self, record_dir: &Path, record: &R) -> StoreResult<()> {
        let yaml = serde_yaml::to_string(record).map_err(StoreError::YamlSerialization)?;
        write_record_file(record_dir, &yaml)
    }

    /// Rejects `candidate` if another record of the table already uses its slug.
    fn ensure_unique_slug(existing: &[R], candidate: &R) -> StoreResult<()> {
        let Some(slug) = candidate.slug() else {
            return Ok(());
        };

        let taken = existing
            .iter()
            .any(|r| r.id() != candidate.id() && r.slug() == Some(slug));
        if taken {
            return Err(StoreError::Conflict(format!(
                "slug '{}' is already used in {}",
                slug,
                R::TABLE
            )));
        }
        Ok(())
    }
}

impl<R: Record> ContentStore for FileContentStore<R> {
    type Item = R;

    fn fetch(&self, visibility: Visibility) -> StoreResult<Vec<R>> {
        let mut records: Vec<R> = self
            .read_all()?
            .into_iter()
            .filter(|r| visibility.admits(r))
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn fetch_one(&self, key: &RecordKey, visibility: Visibility) -> StoreResult<R> {
        let record = match key {
            RecordKey::Id(id) => self.read_by_id(id)?,
            RecordKey::Slug(slug) => self
                .read_all()?
                .into_iter()
                .find(|r| r.slug() == Some(slug.as_str()))
                .ok_or_else(|| Self::not_found(key))?,
        };

        // Hidden records look exactly like missing ones to public readers.
        if !visibility.admits(&record) {
            return Err(Self::not_found(key));
        }
        Ok(record)
    }

    fn insert(&self, draft: R::Draft) -> StoreResult<R> {
        let _guard = self.lock_writes();
        let existing = self.read_all()?;

        let table_dir = self.table_dir();
        let (id, record_dir) = create_unique_record_dir(&table_dir, ContentId::new)?;

        let now = Utc::now();
        let result = R::from_draft(id, draft, now, now).and_then(|record| {
            Self::ensure_unique_slug(&existing, &record)?;
            self.write(&record_dir, &record)?;
            Ok(record)
        });

        match result {
            Ok(record) => {
                tracing::info!("created {} record {}", R::TABLE, record.id());
                Ok(record)
            }
            Err(e) => {
                if let Err(cleanup_error) = fs::remove_dir_all(&record_dir) {
                    tracing::warn!(
                        "failed to clean up {} after rejected insert: {}",
                        record_dir.display(),
                        cleanup_error
                    );
                }
                Err(e)
            }
        }
    }

    fn update(&self, id: &ContentId, draft: R::Draft) -> StoreResult<R> {
        let _guard = self.lock_writes();
        let current = self.read_by_id(id)?;

        let record = R::from_draft(id.clone(), draft, current.created_at(), Utc::now())?;
        Self::ensure_unique_slug(&self.read_all()?, &record)?;

        self.write(&id.sharded_dir(&self.table_dir()), &record)?;
        tracing::info!("updated {} record {}", R::TABLE, id);
        Ok(record)
    }

    fn delete(&self, id: &ContentId) -> StoreResult<()> {
        let _guard = self.lock_writes();
        let record_dir = id.sharded_dir(&self.table_dir());
        if !record_dir.join(RECORD_FILENAME).is_file() {
            return Err(Self::not_found(RecordKey::Id(id.clone())));
        }

        fs::remove_dir_all(&record_dir).map_err(StoreError::FileRemove)?;
        tracing::info!("deleted {} record {}", R::TABLE, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ArticleDraft, CaseStudy, CaseStudyDraft};
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_cfg(content_data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(content_data_dir.to_path_buf())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn article_draft(title: &str, category: &str, published: bool) -> ArticleDraft {
        ArticleDraft {
            title: title.into(),
            category: category.into(),
            published,
            ..ArticleDraft::default()
        }
    }

    fn case_study_draft(title: &str, client: &str) -> CaseStudyDraft {
        CaseStudyDraft {
            title: title.into(),
            description: format!("{title} description"),
            category: "Company Profile".into(),
            client: client.into(),
            ..CaseStudyDraft::default()
        }
    }

    /// Inserts with a small gap so creation timestamps are strictly increasing.
    fn insert_in_order<S: ContentStore>(
        store: &S,
        drafts: Vec<<S::Item as Record>::Draft>,
    ) -> Vec<S::Item> {
        drafts
            .into_iter()
            .map(|draft| {
                sleep(Duration::from_millis(5));
                store.insert(draft).expect("insert should succeed")
            })
            .collect()
    }

    #[test]
    fn test_insert_writes_sharded_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));

        let article = store
            .insert(article_draft("SEO Guide", "SEO", false))
            .expect("insert should succeed");

        let record_path = article
            .id
            .sharded_dir(&temp_dir.path().join("blog_posts"))
            .join(RECORD_FILENAME);
        assert!(record_path.is_file(), "record.yaml should exist");
        assert_eq!(article.slug, "seo-guide");
        assert_eq!(article.created_at, article.updated_at);

        let yaml = fs::read_to_string(record_path).unwrap();
        let stored: Article = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(stored, article);
    }

    #[test]
    fn test_fetch_published_gates_and_orders_newest_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));

        insert_in_order(
            &store,
            vec![
                article_draft("Oldest", "SEO", true),
                article_draft("Draft", "SEO", false),
                article_draft("Newest", "Web Development", true),
            ],
        );

        let published: Vec<String> = store
            .fetch_published()
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(published, vec!["Newest", "Oldest"]);

        let all: Vec<String> = store
            .fetch_all()
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(all, vec!["Newest", "Draft", "Oldest"]);

        let recent = store.fetch_recent(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "Newest");
    }

    #[test]
    fn test_fetch_on_missing_table_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<CaseStudy>::new(test_cfg(temp_dir.path()));

        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_fetch_fails_when_table_is_unreadable() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("blog_posts"), "not a directory").unwrap();
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));

        assert!(matches!(
            store.fetch_published(),
            Err(StoreError::FileRead(_))
        ));
    }

    #[test]
    fn test_fetch_skips_corrupt_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));
        store
            .insert(article_draft("SEO Guide", "SEO", true))
            .unwrap();

        let corrupt = ContentId::new().sharded_dir(&temp_dir.path().join("blog_posts"));
        fs::create_dir_all(&corrupt).unwrap();
        fs::write(corrupt.join(RECORD_FILENAME), "title: [unclosed").unwrap();

        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn test_fetch_one_by_slug_respects_publish_gate() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));
        store
            .insert(article_draft("Draft Post", "SEO", false))
            .unwrap();
        let live = store
            .insert(article_draft("Live Post", "SEO", true))
            .unwrap();

        let found = store
            .fetch_one(&RecordKey::Slug("live-post".into()), Visibility::Public)
            .unwrap();
        assert_eq!(found.id, live.id);

        let hidden = store.fetch_one(&RecordKey::Slug("draft-post".into()), Visibility::Public);
        assert!(matches!(hidden, Err(StoreError::NotFound { .. })));

        let admin = store
            .fetch_one(&RecordKey::Slug("draft-post".into()), Visibility::Any)
            .unwrap();
        assert_eq!(admin.title, "Draft Post");

        let missing = store.fetch_one(&RecordKey::Slug("nope".into()), Visibility::Any);
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_fetch_one_by_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<CaseStudy>::new(test_cfg(temp_dir.path()));
        let created = store
            .insert(case_study_draft("Company Profile Site", "PT Maju"))
            .unwrap();

        let found = store
            .fetch_one(&RecordKey::Id(created.id.clone()), Visibility::Public)
            .unwrap();
        assert_eq!(found, created);

        let missing = store.fetch_one(&RecordKey::Id(ContentId::new()), Visibility::Public);
        match missing {
            Err(StoreError::NotFound { table, .. }) => assert_eq!(table, "portfolio"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_slug_and_leaves_no_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));
        store
            .insert(article_draft("SEO Guide", "SEO", true))
            .unwrap();

        let duplicate = store.insert(ArticleDraft {
            slug: "seo-guide".into(),
            ..article_draft("Another title", "SEO", false)
        });
        assert!(matches!(duplicate, Err(StoreError::Conflict(_))));

        let files = record_files(&temp_dir.path().join("blog_posts")).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_insert_rejects_invalid_draft() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<CaseStudy>::new(test_cfg(temp_dir.path()));

        let result = store.insert(case_study_draft("Landing Page", " "));
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields_and_preserves_created_at() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));
        let original = store
            .insert(article_draft("SEO Guide", "SEO", false))
            .unwrap();

        sleep(Duration::from_millis(5));
        let mut draft = ArticleDraft::from_article(&original);
        draft.published = true;
        draft.title = "SEO Guide 2024".into();
        draft.slug = String::new();

        let updated = store.update(&original.id, draft).unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.slug, "seo-guide-2024");
        assert!(updated.published);

        let stored = store
            .fetch_one(&RecordKey::Id(original.id.clone()), Visibility::Public)
            .unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn test_update_keeps_own_slug_but_rejects_anothers() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<Article>::new(test_cfg(temp_dir.path()));
        let first = store
            .insert(article_draft("First", "SEO", true))
            .unwrap();
        let second = store
            .insert(article_draft("Second", "SEO", true))
            .unwrap();

        // Saving an unchanged record is not a conflict with itself.
        store
            .update(&first.id, ArticleDraft::from_article(&first))
            .expect("unchanged update should succeed");

        let mut stolen = ArticleDraft::from_article(&second);
        stolen.slug = "first".into();
        assert!(matches!(
            store.update(&second.id, stolen),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<CaseStudy>::new(test_cfg(temp_dir.path()));

        let result = store.update(&ContentId::new(), case_study_draft("X", "Y"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_then_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileContentStore::<CaseStudy>::new(test_cfg(temp_dir.path()));
        let created = store
            .insert(case_study_draft("Company Profile Site", "PT Maju"))
            .unwrap();

        store.delete(&created.id).unwrap();

        assert!(store.fetch_all().unwrap().is_empty());
        assert!(store.delete(&created.id).unwrap_err().is_not_found());
        assert!(store
            .fetch_one(&RecordKey::Id(created.id), Visibility::Any)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_tables_are_independent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let articles = FileContentStore::<Article>::new(cfg.clone());
        let case_studies = FileContentStore::<CaseStudy>::new(cfg);

        articles
            .insert(article_draft("SEO Guide", "SEO", true))
            .unwrap();

        assert_eq!(articles.fetch_all().unwrap().len(), 1);
        assert!(case_studies.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_inserts_with_same_slug_admit_one() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(FileContentStore::<Article>::new(test_cfg(temp_dir.path())));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert(article_draft("Same Title", "SEO", true)))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }
}
