//! # API REST
//!
//! REST API implementation for the ArtWeb content service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response bodies and `artweb-core` for everything else.
//!
//! Public list endpoints go through [`ListScreen`]: a store read failure is logged and answered
//! with an empty list, never an error status. Detail and CMS endpoints report failures.

#![warn(rust_2018_idioms)]

use api_shared::{
    ArticleListRes, ArticleReq, ArticleRes, CaseStudyListRes, CaseStudyReq, CaseStudyRes,
    CategoryCountRes, HealthRes, HealthService, StatsRes,
};
use artweb_core::constants::DEFAULT_RECENT_LIMIT;
use artweb_core::{
    Article, CaseStudy, CategoryFilter, ContentId, ContentStats, ContentStore, CoreConfig,
    FileContentStore, FilterState, ListScreen, RecordKey, StoreError, Visibility,
    slug::is_slug,
};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by every request handler.
///
/// Holds one store per table. Handlers never touch the filesystem or the environment directly.
#[derive(Clone)]
pub struct AppState {
    articles: Arc<dyn ContentStore<Item = Article>>,
    case_studies: Arc<dyn ContentStore<Item = CaseStudy>>,
}

impl AppState {
    /// File-backed stores under the configured content data directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self::with_stores(
            Arc::new(FileContentStore::<Article>::new(cfg.clone())),
            Arc::new(FileContentStore::<CaseStudy>::new(cfg)),
        )
    }

    pub fn with_stores(
        articles: Arc<dyn ContentStore<Item = Article>>,
        case_studies: Arc<dyn ContentStore<Item = CaseStudy>>,
    ) -> Self {
        Self {
            articles,
            case_studies,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_articles,
        recent_articles,
        get_article,
        list_case_studies,
        recent_case_studies,
        get_case_study,
        admin_list_articles,
        admin_create_article,
        admin_update_article,
        admin_delete_article,
        admin_list_case_studies,
        admin_create_case_study,
        admin_update_case_study,
        admin_delete_case_study,
        admin_stats,
    ),
    components(schemas(
        HealthRes,
        ArticleRes,
        ArticleListRes,
        ArticleReq,
        CaseStudyRes,
        CaseStudyListRes,
        CaseStudyReq,
        CategoryCountRes,
        StatsRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI mounted at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/articles", get(list_articles))
        .route("/articles/:slug", get(get_article))
        .route("/case-studies", get(list_case_studies))
        .route("/case-studies/:id", get(get_case_study))
        .route("/recent/articles", get(recent_articles))
        .route("/recent/case-studies", get(recent_case_studies))
        .route(
            "/admin/articles",
            get(admin_list_articles).post(admin_create_article),
        )
        .route(
            "/admin/articles/:id",
            put(admin_update_article).delete(admin_delete_article),
        )
        .route(
            "/admin/case-studies",
            get(admin_list_case_studies).post(admin_create_case_study),
        )
        .route(
            "/admin/case-studies/:id",
            put(admin_update_case_study).delete(admin_delete_case_study),
        )
        .route("/admin/stats", get(admin_stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

/// Maps a store failure to a response.
///
/// Client errors carry their message; anything else is logged and answered with a generic body.
fn store_error(action: &str, e: StoreError) -> ApiError {
    match e {
        StoreError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found".into()),
        StoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        other => {
            tracing::error!("{} error: {:?}", action, other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

fn parse_id(id: &str) -> Result<ContentId, ApiError> {
    ContentId::parse(id).map_err(|e| store_error("Parse content id", e))
}

/// Free-text query and category selector of a list request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring matched against the searchable fields.
    q: Option<String>,
    /// Exact category, or `all`.
    category: Option<String>,
}

impl ListQuery {
    fn filter_state(self) -> FilterState {
        let category = self
            .category
            .filter(|c| !c.is_empty())
            .map(|c| CategoryFilter::parse(&c))
            .unwrap_or_default();
        FilterState::new(self.q.unwrap_or_default(), category)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of records to return (default 3).
    limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/articles",
    params(ListQuery),
    responses(
        (status = 200, description = "Published articles matching the filter", body = ArticleListRes)
    )
)]
/// List published articles, newest first, narrowed by the query and category.
///
/// A store failure gives an empty list.
#[axum::debug_handler]
async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ArticleListRes> {
    let mut screen = ListScreen::load(state.articles.as_ref());
    screen.set_filter(query.filter_state());
    let summary = screen.summary();
    let counts = screen.category_counts();
    Json(ArticleListRes::new(screen.into_visible(), summary, counts))
}

#[utoipa::path(
    get,
    path = "/recent/articles",
    params(RecentQuery),
    responses(
        (status = 200, description = "Latest published articles", body = [ArticleRes])
    )
)]
#[axum::debug_handler]
async fn recent_articles(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<ArticleRes>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let articles = state.articles.fetch_recent(limit).unwrap_or_else(|e| {
        tracing::error!("Recent articles error: {:?}", e);
        Vec::new()
    });
    Json(articles.into_iter().map(ArticleRes::from).collect())
}

#[utoipa::path(
    get,
    path = "/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Published article", body = ArticleRes),
        (status = 404, description = "No published article with this slug"),
        (status = 500, description = "Internal server error")
    )
)]
/// Read one published article by slug.
///
/// Unpublished articles answer 404, exactly like missing ones. A path segment that is not in
/// slug form cannot name an article and is answered without reading the store.
#[axum::debug_handler]
async fn get_article(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Result<Json<ArticleRes>, ApiError> {
    if !is_slug(&slug) {
        return Err((StatusCode::NOT_FOUND, "Not found".into()));
    }
    state
        .articles
        .fetch_one(&RecordKey::Slug(slug), Visibility::Public)
        .map(|a| Json(a.into()))
        .map_err(|e| store_error("Read article", e))
}

#[utoipa::path(
    get,
    path = "/case-studies",
    params(ListQuery),
    responses(
        (status = 200, description = "Case studies matching the filter", body = CaseStudyListRes)
    )
)]
/// List case studies, newest first, narrowed by the query and category.
///
/// A store failure gives an empty list.
#[axum::debug_handler]
async fn list_case_studies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<CaseStudyListRes> {
    let mut screen = ListScreen::load(state.case_studies.as_ref());
    screen.set_filter(query.filter_state());
    let summary = screen.summary();
    let counts = screen.category_counts();
    Json(CaseStudyListRes::new(screen.into_visible(), summary, counts))
}

#[utoipa::path(
    get,
    path = "/recent/case-studies",
    params(RecentQuery),
    responses(
        (status = 200, description = "Latest case studies", body = [CaseStudyRes])
    )
)]
#[axum::debug_handler]
async fn recent_case_studies(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<CaseStudyRes>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let case_studies = state.case_studies.fetch_recent(limit).unwrap_or_else(|e| {
        tracing::error!("Recent case studies error: {:?}", e);
        Vec::new()
    });
    Json(case_studies.into_iter().map(CaseStudyRes::from).collect())
}

#[utoipa::path(
    get,
    path = "/case-studies/{id}",
    params(("id" = String, Path, description = "Case study identifier")),
    responses(
        (status = 200, description = "Case study", body = CaseStudyRes),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Case study not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn get_case_study(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<CaseStudyRes>, ApiError> {
    let id = parse_id(&id)?;
    state
        .case_studies
        .fetch_one(&RecordKey::Id(id), Visibility::Public)
        .map(|c| Json(c.into()))
        .map_err(|e| store_error("Read case study", e))
}

#[utoipa::path(
    get,
    path = "/admin/articles",
    responses(
        (status = 200, description = "Every article, drafts included", body = [ArticleRes]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleRes>>, ApiError> {
    let articles = state
        .articles
        .fetch_all()
        .map_err(|e| store_error("List articles", e))?;
    Ok(Json(articles.into_iter().map(ArticleRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/articles",
    request_body = ArticleReq,
    responses(
        (status = 201, description = "Article created", body = ArticleRes),
        (status = 400, description = "Invalid article"),
        (status = 409, description = "Slug already in use"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create an article. The slug is derived from the title when left empty.
#[axum::debug_handler]
async fn admin_create_article(
    State(state): State<AppState>,
    Json(req): Json<ArticleReq>,
) -> Result<(StatusCode, Json<ArticleRes>), ApiError> {
    let article = state
        .articles
        .insert(req.into())
        .map_err(|e| store_error("Create article", e))?;
    Ok((StatusCode::CREATED, Json(article.into())))
}

#[utoipa::path(
    put,
    path = "/admin/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    request_body = ArticleReq,
    responses(
        (status = 200, description = "Article replaced", body = ArticleRes),
        (status = 400, description = "Invalid article or identifier"),
        (status = 404, description = "Article not found"),
        (status = 409, description = "Slug already in use"),
        (status = 500, description = "Internal server error")
    )
)]
/// Replace every editable field of an article. The creation time is kept.
#[axum::debug_handler]
async fn admin_update_article(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<ArticleReq>,
) -> Result<Json<ArticleRes>, ApiError> {
    let id = parse_id(&id)?;
    state
        .articles
        .update(&id, req.into())
        .map(|a| Json(a.into()))
        .map_err(|e| store_error("Update article", e))
}

#[utoipa::path(
    delete,
    path = "/admin/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 404, description = "Article not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_delete_article(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state
        .articles
        .delete(&id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| store_error("Delete article", e))
}

#[utoipa::path(
    get,
    path = "/admin/case-studies",
    responses(
        (status = 200, description = "Every case study", body = [CaseStudyRes]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_list_case_studies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseStudyRes>>, ApiError> {
    let case_studies = state
        .case_studies
        .fetch_all()
        .map_err(|e| store_error("List case studies", e))?;
    Ok(Json(case_studies.into_iter().map(CaseStudyRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/case-studies",
    request_body = CaseStudyReq,
    responses(
        (status = 201, description = "Case study created", body = CaseStudyRes),
        (status = 400, description = "Invalid case study"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_create_case_study(
    State(state): State<AppState>,
    Json(req): Json<CaseStudyReq>,
) -> Result<(StatusCode, Json<CaseStudyRes>), ApiError> {
    let case_study = state
        .case_studies
        .insert(req.into())
        .map_err(|e| store_error("Create case study", e))?;
    Ok((StatusCode::CREATED, Json(case_study.into())))
}

#[utoipa::path(
    put,
    path = "/admin/case-studies/{id}",
    params(("id" = String, Path, description = "Case study identifier")),
    request_body = CaseStudyReq,
    responses(
        (status = 200, description = "Case study replaced", body = CaseStudyRes),
        (status = 400, description = "Invalid case study or identifier"),
        (status = 404, description = "Case study not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_update_case_study(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<CaseStudyReq>,
) -> Result<Json<CaseStudyRes>, ApiError> {
    let id = parse_id(&id)?;
    state
        .case_studies
        .update(&id, req.into())
        .map(|c| Json(c.into()))
        .map_err(|e| store_error("Update case study", e))
}

#[utoipa::path(
    delete,
    path = "/admin/case-studies/{id}",
    params(("id" = String, Path, description = "Case study identifier")),
    responses(
        (status = 204, description = "Case study deleted"),
        (status = 404, description = "Case study not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_delete_case_study(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state
        .case_studies
        .delete(&id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| store_error("Delete case study", e))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Dashboard counts", body = StatsRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn admin_stats(State(state): State<AppState>) -> Result<Json<StatsRes>, ApiError> {
    ContentStats::collect(state.articles.as_ref(), state.case_studies.as_ref())
        .map(|stats| Json(stats.into()))
        .map_err(|e| store_error("Collect stats", e))
}
