//! Request and response bodies.
//!
//! Identifiers are carried as their canonical 32-character hex form and timestamps as RFC 3339
//! strings, so the JSON shape does not depend on how the store represents them.

use artweb_core::filter::{CategoryCount, CategoryCounts};
use artweb_core::{
    Article, ArticleDraft, CaseStudy, CaseStudyDraft, ContentStats, ResultSummary,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleRes {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub category: String,
    pub read_time: u32,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleRes {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.to_string(),
            title: article.title,
            slug: article.slug,
            excerpt: article.excerpt,
            content: article.content,
            image_url: article.image_url,
            author: article.author,
            category: article.category,
            read_time: article.read_time,
            published: article.published,
            created_at: article.created_at.to_rfc3339(),
            updated_at: article.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseStudyRes {
    pub id: String,
    pub title: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub image_url: String,
    pub gallery_images: Vec<String>,
    pub category: String,
    pub website_url: Option<String>,
    pub client: String,
    pub year: i32,
    pub features: Vec<String>,
    pub project_duration: String,
    pub team_size: u32,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CaseStudy> for CaseStudyRes {
    fn from(case_study: CaseStudy) -> Self {
        Self {
            id: case_study.id.to_string(),
            title: case_study.title,
            description: case_study.description,
            detailed_description: case_study.detailed_description,
            image_url: case_study.image_url,
            gallery_images: case_study.gallery_images,
            category: case_study.category,
            website_url: case_study.website_url,
            client: case_study.client,
            year: case_study.year,
            features: case_study.features,
            project_duration: case_study.project_duration,
            team_size: case_study.team_size,
            featured: case_study.featured,
            created_at: case_study.created_at.to_rfc3339(),
            updated_at: case_study.updated_at.to_rfc3339(),
        }
    }
}

/// Number of items in one category of the unfiltered collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountRes {
    pub category: String,
    pub count: usize,
}

/// A filtered article list.
///
/// `items` is the visible subset; `categories` and `total` describe the whole collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleListRes {
    pub items: Vec<ArticleRes>,
    pub shown: usize,
    pub total: usize,
    pub categories: Vec<CategoryCountRes>,
}

/// A filtered case study list. Same shape as [`ArticleListRes`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseStudyListRes {
    pub items: Vec<CaseStudyRes>,
    pub shown: usize,
    pub total: usize,
    pub categories: Vec<CategoryCountRes>,
}

impl From<CategoryCount> for CategoryCountRes {
    fn from(count: CategoryCount) -> Self {
        Self {
            category: count.category,
            count: count.count,
        }
    }
}

/// Builds a list body from the visible items and the screen figures.
fn list_body<T, R: From<T>>(
    items: Vec<T>,
    summary: ResultSummary,
    counts: CategoryCounts,
) -> (Vec<R>, usize, usize, Vec<CategoryCountRes>) {
    (
        items.into_iter().map(R::from).collect(),
        summary.shown,
        summary.total,
        counts.categories.into_iter().map(Into::into).collect(),
    )
}

impl ArticleListRes {
    pub fn new(items: Vec<Article>, summary: ResultSummary, counts: CategoryCounts) -> Self {
        let (items, shown, total, categories) = list_body(items, summary, counts);
        Self {
            items,
            shown,
            total,
            categories,
        }
    }
}

impl CaseStudyListRes {
    pub fn new(items: Vec<CaseStudy>, summary: ResultSummary, counts: CategoryCounts) -> Self {
        let (items, shown, total, categories) = list_body(items, summary, counts);
        Self {
            items,
            shown,
            total,
            categories,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsRes {
    pub total_case_studies: usize,
    pub featured_case_studies: usize,
    pub total_articles: usize,
    pub published_articles: usize,
}

impl From<ContentStats> for StatsRes {
    fn from(stats: ContentStats) -> Self {
        Self {
            total_case_studies: stats.total_case_studies,
            featured_case_studies: stats.featured_case_studies,
            total_articles: stats.total_articles,
            published_articles: stats.published_articles,
        }
    }
}

/// Article create / full update body. Omitted fields take the CMS form defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArticleReq {
    pub title: String,
    /// Derived from the title when empty.
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub author: Option<String>,
    pub category: String,
    pub read_time: Option<u32>,
    pub published: bool,
}

impl From<ArticleReq> for ArticleDraft {
    fn from(req: ArticleReq) -> Self {
        let defaults = ArticleDraft::default();
        Self {
            title: req.title,
            slug: req.slug,
            excerpt: req.excerpt,
            content: req.content,
            image_url: req.image_url,
            author: req.author.unwrap_or(defaults.author),
            category: req.category,
            read_time: req.read_time.unwrap_or(defaults.read_time),
            published: req.published,
        }
    }
}

/// Case study create / full update body. Omitted fields take the CMS form defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CaseStudyReq {
    pub title: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub image_url: String,
    pub gallery_images: Vec<String>,
    pub category: String,
    pub website_url: Option<String>,
    pub client: String,
    pub year: Option<i32>,
    pub features: Vec<String>,
    pub project_duration: String,
    pub team_size: Option<u32>,
    pub featured: bool,
}

impl From<CaseStudyReq> for CaseStudyDraft {
    fn from(req: CaseStudyReq) -> Self {
        let defaults = CaseStudyDraft::default();
        Self {
            title: req.title,
            description: req.description,
            detailed_description: req.detailed_description,
            image_url: req.image_url,
            gallery_images: req.gallery_images,
            category: req.category,
            website_url: req.website_url,
            client: req.client,
            year: req.year.unwrap_or(defaults.year),
            features: req.features,
            project_duration: req.project_duration,
            team_size: req.team_size.unwrap_or(defaults.team_size),
            featured: req.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artweb_core::ContentId;
    use chrono::{Datelike, TimeZone, Utc};

    #[test]
    fn test_article_req_defaults_follow_cms_form() {
        let req: ArticleReq =
            serde_json::from_str(r#"{"title": "SEO Guide", "category": "SEO"}"#).unwrap();
        let draft = ArticleDraft::from(req);

        assert_eq!(draft.author, "Admin ArtWeb");
        assert_eq!(draft.read_time, 5);
        assert!(!draft.published);
        assert!(draft.slug.is_empty());
    }

    #[test]
    fn test_case_study_req_defaults_follow_cms_form() {
        let req: CaseStudyReq = serde_json::from_str(
            r#"{"title": "Site", "category": "E-Commerce", "client": "PT Maju", "team_size": 4}"#,
        )
        .unwrap();
        let draft = CaseStudyDraft::from(req);

        assert_eq!(draft.team_size, 4);
        assert_eq!(draft.year, Utc::now().year());
        assert!(draft.features.is_empty());
    }

    #[test]
    fn test_article_res_uses_canonical_id_and_rfc3339() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let id = ContentId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let article = <Article as artweb_core::Record>::from_draft(
            id,
            ArticleDraft {
                title: "SEO Guide".into(),
                category: "SEO".into(),
                ..ArticleDraft::default()
            },
            created_at,
            created_at,
        )
        .unwrap();

        let res = ArticleRes::from(article);
        assert_eq!(res.id, "550e8400e29b41d4a716446655440000");
        assert_eq!(res.slug, "seo-guide");
        assert_eq!(res.created_at, "2024-05-01T08:30:00+00:00");
    }
}
