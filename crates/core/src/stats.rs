//! Dashboard summary figures.

use crate::models::{Article, CaseStudy};
use crate::repositories::ContentStore;
use crate::StoreResult;
use serde::{Deserialize, Serialize};

/// Content counts shown on the CMS dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub total_case_studies: usize,
    pub featured_case_studies: usize,
    pub total_articles: usize,
    pub published_articles: usize,
}

impl ContentStats {
    pub fn from_records(articles: &[Article], case_studies: &[CaseStudy]) -> Self {
        Self {
            total_case_studies: case_studies.len(),
            featured_case_studies: case_studies.iter().filter(|c| c.featured).count(),
            total_articles: articles.len(),
            published_articles: articles.iter().filter(|a| a.published).count(),
        }
    }

    /// Counts every record of both tables, drafts included.
    pub fn collect<A, C>(articles: &A, case_studies: &C) -> StoreResult<Self>
    where
        A: ContentStore<Item = Article> + ?Sized,
        C: ContentStore<Item = CaseStudy> + ?Sized,
    {
        let articles = articles.fetch_all()?;
        let case_studies = case_studies.fetch_all()?;
        Ok(Self::from_records(&articles, &case_studies))
    }
}
