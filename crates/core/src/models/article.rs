use super::{required, ContentTable, Record};
use crate::constants::{DEFAULT_AUTHOR, DEFAULT_READ_TIME_MINUTES};
use crate::filter::Searchable;
use crate::id::ContentId;
use crate::slug::slugify;
use crate::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ContentId,
    pub title: String,
    /// URL-safe key, unique among articles.
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    /// Cover image reference.
    pub image_url: String,
    pub author: String,
    pub category: String,
    /// Estimated read time in minutes, at least 1.
    pub read_time: u32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable article fields, as submitted by the CMS form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDraft {
    pub title: String,
    /// Left blank to derive the slug from the title.
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub category: String,
    pub read_time: u32,
    pub published: bool,
}

impl Default for ArticleDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            image_url: String::new(),
            author: DEFAULT_AUTHOR.to_owned(),
            category: String::new(),
            read_time: DEFAULT_READ_TIME_MINUTES,
            published: false,
        }
    }
}

impl ArticleDraft {
    /// Draft pre-filled from an existing article, for edits.
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            excerpt: article.excerpt.clone(),
            content: article.content.clone(),
            image_url: article.image_url.clone(),
            author: article.author.clone(),
            category: article.category.clone(),
            read_time: article.read_time,
            published: article.published,
        }
    }
}

impl Record for Article {
    type Draft = ArticleDraft;

    const TABLE: ContentTable = ContentTable::Articles;

    fn id(&self) -> &ContentId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn is_public(&self) -> bool {
        self.published
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn from_draft(
        id: ContentId,
        draft: ArticleDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Self> {
        let title = required("title", &draft.title)?;
        let category = required("category", &draft.category)?;

        if draft.read_time == 0 {
            return Err(StoreError::InvalidInput(
                "read_time must be at least 1 minute".into(),
            ));
        }

        // An explicit slug is normalised too, so hand-typed values stay URL-safe.
        let slug_source = if draft.slug.trim().is_empty() {
            title.as_str()
        } else {
            draft.slug.as_str()
        };
        let slug = slugify(slug_source);
        if slug.is_empty() {
            return Err(StoreError::InvalidInput(format!(
                "cannot derive a slug from '{}'",
                slug_source
            )));
        }

        let author = match draft.author.trim() {
            "" => DEFAULT_AUTHOR.to_owned(),
            author => author.to_owned(),
        };

        Ok(Self {
            id,
            title,
            slug,
            excerpt: draft.excerpt.trim().to_owned(),
            content: draft.content,
            image_url: draft.image_url.trim().to_owned(),
            author,
            category,
            read_time: draft.read_time,
            published: draft.published,
            created_at,
            updated_at,
        })
    }
}

impl Searchable for Article {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.excerpt, &self.author]
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.into(),
            category: "Web Development".into(),
            ..ArticleDraft::default()
        }
    }

    fn build(draft: ArticleDraft) -> StoreResult<Article> {
        let now = Utc::now();
        Article::from_draft(ContentId::new(), draft, now, now)
    }

    #[test]
    fn test_draft_defaults_match_cms_form() {
        let draft = ArticleDraft::default();
        assert_eq!(draft.author, "Admin ArtWeb");
        assert_eq!(draft.read_time, 5);
        assert!(!draft.published);
    }

    #[test]
    fn test_from_draft_derives_slug_from_title() {
        let article = build(draft("5 Alasan Mengapa Bisnis Anda Butuh Website!")).unwrap();
        assert_eq!(article.slug, "5-alasan-mengapa-bisnis-anda-butuh-website");
        assert!(!article.published);
    }

    #[test]
    fn test_from_draft_normalises_explicit_slug() {
        let article = build(ArticleDraft {
            slug: "My Custom Slug".into(),
            ..draft("Anything")
        })
        .unwrap();
        assert_eq!(article.slug, "my-custom-slug");
    }

    #[test]
    fn test_from_draft_rejects_missing_required_fields() {
        assert!(matches!(
            build(draft("   ")),
            Err(StoreError::InvalidInput(msg)) if msg.starts_with("title")
        ));
        assert!(matches!(
            build(ArticleDraft {
                category: "".into(),
                ..draft("SEO Guide")
            }),
            Err(StoreError::InvalidInput(msg)) if msg.starts_with("category")
        ));
        assert!(matches!(
            build(ArticleDraft {
                read_time: 0,
                ..draft("SEO Guide")
            }),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_draft_rejects_title_without_slug_characters() {
        assert!(matches!(
            build(draft("!!!")),
            Err(StoreError::InvalidInput(msg)) if msg.contains("slug")
        ));
    }

    #[test]
    fn test_blank_author_falls_back_to_default() {
        let article = build(ArticleDraft {
            author: "  ".into(),
            ..draft("SEO Guide")
        })
        .unwrap();
        assert_eq!(article.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_draft_round_trips_through_article() {
        let article = build(ArticleDraft {
            excerpt: "Short intro".into(),
            content: "Body".into(),
            published: true,
            ..draft("SEO Guide")
        })
        .unwrap();
        let again = ArticleDraft::from_article(&article);
        assert_eq!(again.slug, "seo-guide");
        assert_eq!(again.excerpt, "Short intro");
        assert!(again.published);
    }

    #[test]
    fn test_search_fields_are_title_excerpt_author() {
        let article = build(ArticleDraft {
            excerpt: "An excerpt".into(),
            author: "Sari".into(),
            ..draft("React Tips")
        })
        .unwrap();
        assert_eq!(article.search_fields(), vec!["React Tips", "An excerpt", "Sari"]);
        assert_eq!(Searchable::category(&article), "Web Development");
    }
}
