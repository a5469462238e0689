use super::{required, ContentTable, Record};
use crate::constants::DEFAULT_TEAM_SIZE;
use crate::filter::Searchable;
use crate::id::ContentId;
use crate::{StoreError, StoreResult};
use artweb_types::{blank_to_none, non_blank_entries};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project.
///
/// Case studies have no draft state: every stored case study is public. `featured` only
/// controls highlighting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: ContentId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub client: String,
    pub year: i32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub project_duration: String,
    pub team_size: u32,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable case study fields, as submitted by the CMS form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStudyDraft {
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
}

impl Default for CaseStudyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            detailed_description: None,
            image_url: String::new(),
            gallery_images: Vec::new(),
            category: String::new(),
            website_url: None,
            client: String::new(),
            year: Utc::now().year(),
            features: Vec::new(),
            project_duration: String::new(),
            team_size: DEFAULT_TEAM_SIZE,
            featured: false,
        }
    }
}

impl CaseStudyDraft {
    /// Draft pre-filled from an existing case study, for edits.
    pub fn from_case_study(case_study: &CaseStudy) -> Self {
        Self {
            title: case_study.title.clone(),
            description: case_study.description.clone(),
            detailed_description: case_study.detailed_description.clone(),
            image_url: case_study.image_url.clone(),
            gallery_images: case_study.gallery_images.clone(),
            category: case_study.category.clone(),
            website_url: case_study.website_url.clone(),
            client: case_study.client.clone(),
            year: case_study.year,
            features: case_study.features.clone(),
            project_duration: case_study.project_duration.clone(),
            team_size: case_study.team_size,
            featured: case_study.featured,
        }
    }
}

impl Record for CaseStudy {
    type Draft = CaseStudyDraft;

    const TABLE: ContentTable = ContentTable::CaseStudies;

    fn id(&self) -> &ContentId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn is_public(&self) -> bool {
        true
    }

    fn from_draft(
        id: ContentId,
        draft: CaseStudyDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Self> {
        let title = required("title", &draft.title)?;
        let category = required("category", &draft.category)?;
        let client = required("client", &draft.client)?;

        if draft.team_size == 0 {
            return Err(StoreError::InvalidInput(
                "team_size must be at least 1".into(),
            ));
        }

        Ok(Self {
            id,
            title,
            description: draft.description.trim().to_owned(),
            detailed_description: blank_to_none(draft.detailed_description),
            image_url: draft.image_url.trim().to_owned(),
            gallery_images: non_blank_entries(draft.gallery_images),
            category,
            website_url: blank_to_none(draft.website_url),
            client,
            year: draft.year,
            features: non_blank_entries(draft.features),
            project_duration: draft.project_duration.trim().to_owned(),
            team_size: draft.team_size,
            featured: draft.featured,
            created_at,
            updated_at,
        })
    }
}

impl Searchable for CaseStudy {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.client]
    }

    fn category(&self) -> &str {
        &self.category
    }
}
