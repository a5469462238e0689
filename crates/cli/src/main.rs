use anyhow::Context;
use artweb_core::config::{content_data_dir_from_env_value, initialise_storage};
use artweb_core::{
    slugify, Article, ArticleDraft, CaseStudy, CaseStudyDraft, CategoryFilter, ContentId, ContentStats,
    ContentStore, CoreConfig, FileContentStore, FilterState, ListScreen, RecordKey, Searchable,
    Visibility,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "artweb")]
#[command(about = "ArtWeb content service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the content data directory and its tables
    Init,
    /// Print the slug derived from a title
    Slugify {
        title: String,
    },
    /// List the categories of a collection with their item counts
    Categories {
        kind: ContentKind,
    },
    /// Print dashboard counts
    Stats,
    /// Manage blog articles
    #[command(subcommand)]
    Articles(ArticleCommands),
    /// Manage portfolio case studies
    #[command(subcommand)]
    Portfolio(PortfolioCommands),
}

#[derive(Clone, Copy, ValueEnum)]
enum ContentKind {
    Articles,
    Portfolio,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive search text
    #[arg(long, short, default_value = "")]
    query: String,
    /// Exact category, or "all"
    #[arg(long, short, default_value = "all")]
    category: String,
}

impl ListArgs {
    fn filter_state(&self) -> FilterState {
        FilterState::new(self.query.as_str(), self.category.as_str())
    }
}

#[derive(Subcommand)]
enum ArticleCommands {
    /// List articles, newest first
    List {
        #[command(flatten)]
        filter: ListArgs,
        /// Include unpublished drafts
        #[arg(long)]
        all: bool,
    },
    /// Show one article by slug or identifier
    Show {
        key: String,
    },
    /// Create an article
    Create {
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Replace the given fields of an article
    Update {
        id: String,
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Make an article visible to readers
    Publish {
        id: String,
    },
    /// Hide an article from readers
    Unpublish {
        id: String,
    },
    /// Delete an article
    Delete {
        id: String,
    },
}

/// Article fields settable from the command line. Unset fields keep their current value.
#[derive(Args)]
struct ArticleFields {
    #[arg(long)]
    title: Option<String>,
    /// Derived from the title when empty
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    excerpt: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Read time in minutes
    #[arg(long)]
    read_time: Option<u32>,
    #[arg(long)]
    published: Option<bool>,
}

impl ArticleFields {
    fn apply(self, draft: &mut ArticleDraft) {
        let Self {
            title,
            slug,
            excerpt,
            content,
            image_url,
            author,
            category,
            read_time,
            published,
        } = self;
        set(&mut draft.title, title);
        set(&mut draft.slug, slug);
        set(&mut draft.excerpt, excerpt);
        set(&mut draft.content, content);
        set(&mut draft.image_url, image_url);
        set(&mut draft.author, author);
        set(&mut draft.category, category);
        set(&mut draft.read_time, read_time);
        set(&mut draft.published, published);
    }
}

#[derive(Subcommand)]
enum PortfolioCommands {
    /// List case studies, newest first
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    /// Show one case study by identifier
    Show {
        id: String,
    },
    /// Create a case study
    Create {
        #[command(flatten)]
        fields: CaseStudyFields,
    },
    /// Replace the given fields of a case study
    Update {
        id: String,
        #[command(flatten)]
        fields: CaseStudyUpdateFields,
    },
    /// Delete a case study
    Delete {
        id: String,
    },
}

#[derive(Args)]
struct CaseStudyFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    client: String,
    #[arg(long)]
    detailed_description: Option<String>,
    #[arg(long, default_value = "")]
    image_url: String,
    /// Repeat for each gallery image
    #[arg(long = "gallery-image")]
    gallery_images: Vec<String>,
    #[arg(long)]
    website_url: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// Repeat for each feature tag
    #[arg(long = "feature")]
    features: Vec<String>,
    #[arg(long, default_value = "")]
    project_duration: String,
    #[arg(long)]
    team_size: Option<u32>,
    #[arg(long)]
    featured: bool,
}

impl From<CaseStudyFields> for CaseStudyDraft {
    fn from(fields: CaseStudyFields) -> Self {
        let defaults = CaseStudyDraft::default();
        Self {
            title: fields.title,
            description: fields.description,
            detailed_description: fields.detailed_description,
            image_url: fields.image_url,
            gallery_images: fields.gallery_images,
            category: fields.category,
            website_url: fields.website_url,
            client: fields.client,
            year: fields.year.unwrap_or(defaults.year),
            features: fields.features,
            project_duration: fields.project_duration,
            team_size: fields.team_size.unwrap_or(defaults.team_size),
            featured: fields.featured,
        }
    }
}

/// Case study fields for an update. Unset fields keep their current value; a repeated list flag
/// replaces the whole list.
#[derive(Args)]
struct CaseStudyUpdateFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    client: Option<String>,
    /// Empty to remove
    #[arg(long)]
    detailed_description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long = "gallery-image")]
    gallery_images: Vec<String>,
    /// Empty to remove
    #[arg(long)]
    website_url: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long = "feature")]
    features: Vec<String>,
    #[arg(long)]
    project_duration: Option<String>,
    #[arg(long)]
    team_size: Option<u32>,
    #[arg(long)]
    featured: Option<bool>,
}

impl CaseStudyUpdateFields {
    fn apply(self, draft: &mut CaseStudyDraft) {
        let Self {
            title,
            description,
            category,
            client,
            detailed_description,
            image_url,
            gallery_images,
            website_url,
            year,
            features,
            project_duration,
            team_size,
            featured,
        } = self;
        set(&mut draft.title, title);
        set(&mut draft.description, description);
        set(&mut draft.category, category);
        set(&mut draft.client, client);
        set(&mut draft.detailed_description, detailed_description.map(Some));
        set(&mut draft.image_url, image_url);
        set(&mut draft.gallery_images, non_empty(gallery_images));
        set(&mut draft.website_url, website_url.map(Some));
        set(&mut draft.year, year);
        set(&mut draft.features, non_empty(features));
        set(&mut draft.project_duration, project_duration);
        set(&mut draft.team_size, team_size);
        set(&mut draft.featured, featured);
    }
}

fn non_empty(entries: Vec<String>) -> Option<Vec<String>> {
    (!entries.is_empty()).then_some(entries)
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(CoreConfig::new(content_data_dir_from_env_value(
        std::env::var("CONTENT_DATA_DIR").ok(),
    ))?);

    match cli.command {
        Commands::Init => {
            initialise_storage(&cfg)?;
            println!(
                "Initialised content storage at {}",
                cfg.content_data_dir().display()
            );
        }
        Commands::Slugify { title } => println!("{}", slugify(&title)),
        Commands::Categories { kind } => match kind {
            ContentKind::Articles => {
                print_categories(&ListScreen::load(&FileContentStore::<Article>::new(cfg)))
            }
            ContentKind::Portfolio => {
                print_categories(&ListScreen::load(&FileContentStore::<CaseStudy>::new(cfg)))
            }
        },
        Commands::Stats => {
            let stats = ContentStats::collect(
                &FileContentStore::<Article>::new(cfg.clone()),
                &FileContentStore::<CaseStudy>::new(cfg),
            )?;
            println!("Case studies: {}", stats.total_case_studies);
            println!("Featured case studies: {}", stats.featured_case_studies);
            println!("Articles: {}", stats.total_articles);
            println!("Published articles: {}", stats.published_articles);
        }
        Commands::Articles(command) => run_articles(FileContentStore::new(cfg), command)?,
        Commands::Portfolio(command) => run_portfolio(FileContentStore::new(cfg), command)?,
    }

    Ok(())
}

fn run_articles(store: FileContentStore<Article>, command: ArticleCommands) -> anyhow::Result<()> {
    match command {
        ArticleCommands::List { filter, all } => {
            let mut screen = if all {
                ListScreen::from_fetch(store.fetch_all())
            } else {
                ListScreen::load(&store)
            };
            screen.set_filter(filter.filter_state());
            for article in screen.visible() {
                println!(
                    "{}  {}  {:<11}  {}  {} ({})",
                    article.id,
                    article.created_at.format("%Y-%m-%d"),
                    if article.published { "published" } else { "draft" },
                    article.category,
                    article.title,
                    article.slug
                );
            }
            print_summary(&screen);
        }
        ArticleCommands::Show { key } => {
            let key = if ContentId::is_canonical(&key) {
                RecordKey::Id(ContentId::parse(&key)?)
            } else {
                RecordKey::Slug(key)
            };
            let article = store
                .fetch_one(&key, Visibility::Any)
                .with_context(|| format!("no article with {}", key))?;
            print_article(&article);
        }
        ArticleCommands::Create { fields } => {
            let mut draft = ArticleDraft::default();
            fields.apply(&mut draft);
            let article = store.insert(draft)?;
            println!("Created article {} ({})", article.id, article.slug);
        }
        ArticleCommands::Update { id, fields } => {
            let current = load_article(&store, &id)?;
            let mut draft = ArticleDraft::from_article(&current);
            fields.apply(&mut draft);
            let article = store.update(&current.id, draft)?;
            println!("Updated article {} ({})", article.id, article.slug);
        }
        ArticleCommands::Publish { id } => set_published(&store, &id, true)?,
        ArticleCommands::Unpublish { id } => set_published(&store, &id, false)?,
        ArticleCommands::Delete { id } => {
            store.delete(&ContentId::parse(&id)?)?;
            println!("Deleted article {}", id);
        }
    }
    Ok(())
}

fn load_article(store: &FileContentStore<Article>, id: &str) -> anyhow::Result<Article> {
    let key = RecordKey::Id(ContentId::parse(id)?);
    store
        .fetch_one(&key, Visibility::Any)
        .with_context(|| format!("no article with {}", key))
}

fn set_published(
    store: &FileContentStore<Article>,
    id: &str,
    published: bool,
) -> anyhow::Result<()> {
    let current = load_article(store, id)?;
    let mut draft = ArticleDraft::from_article(&current);
    draft.published = published;
    let article = store.update(&current.id, draft)?;
    println!(
        "Article {} is now {}",
        article.slug,
        if article.published { "published" } else { "a draft" }
    );
    Ok(())
}

fn run_portfolio(
    store: FileContentStore<CaseStudy>,
    command: PortfolioCommands,
) -> anyhow::Result<()> {
    match command {
        PortfolioCommands::List { filter } => {
            let mut screen = ListScreen::load(&store);
            screen.set_filter(filter.filter_state());
            for case_study in screen.visible() {
                println!(
                    "{}  {}  {}{}  {} for {}",
                    case_study.id,
                    case_study.year,
                    case_study.category,
                    if case_study.featured { " *" } else { "" },
                    case_study.title,
                    case_study.client
                );
            }
            print_summary(&screen);
        }
        PortfolioCommands::Show { id } => {
            let key = RecordKey::Id(ContentId::parse(&id)?);
            let case_study = store
                .fetch_one(&key, Visibility::Any)
                .with_context(|| format!("no case study with {}", key))?;
            print_case_study(&case_study);
        }
        PortfolioCommands::Create { fields } => {
            let case_study = store.insert(fields.into())?;
            println!("Created case study {}", case_study.id);
        }
        PortfolioCommands::Update { id, fields } => {
            let key = RecordKey::Id(ContentId::parse(&id)?);
            let current = store
                .fetch_one(&key, Visibility::Any)
                .with_context(|| format!("no case study with {}", key))?;
            let mut draft = CaseStudyDraft::from_case_study(&current);
            fields.apply(&mut draft);
            let case_study = store.update(&current.id, draft)?;
            println!("Updated case study {}", case_study.id);
        }
        PortfolioCommands::Delete { id } => {
            store.delete(&ContentId::parse(&id)?)?;
            println!("Deleted case study {}", id);
        }
    }
    Ok(())
}

fn print_summary<T: Searchable>(screen: &ListScreen<T>) {
    println!("{}", summary_line(screen));
}

/// "Showing X of Y", plus the size of the selected category when one is selected.
fn summary_line<T: Searchable>(screen: &ListScreen<T>) -> String {
    let summary = screen.summary();
    match &screen.filter().category {
        CategoryFilter::All => format!("Showing {} of {}", summary.shown, summary.total),
        selected @ CategoryFilter::Only(name) => format!(
            "Showing {} of {} ({} in {})",
            summary.shown,
            summary.total,
            screen.category_counts().count_for(selected),
            name
        ),
    }
}

fn print_categories<T: Searchable>(screen: &ListScreen<T>) {
    let counts = screen.category_counts();
    println!("all ({})", counts.all);
    for entry in counts.categories {
        println!("{} ({})", entry.category, entry.count);
    }
}

fn print_article(article: &Article) {
    println!("ID: {}", article.id);
    println!("Title: {}", article.title);
    println!("Slug: {}", article.slug);
    println!("Category: {}", article.category);
    println!("Author: {}", article.author);
    println!("Read time: {} min", article.read_time);
    println!("Published: {}", article.published);
    println!("Created: {}", article.created_at.to_rfc3339());
    println!("Updated: {}", article.updated_at.to_rfc3339());
    if !article.image_url.is_empty() {
        println!("Image: {}", article.image_url);
    }
    println!();
    println!("{}", article.excerpt);
    println!();
    println!("{}", article.content);
}

fn print_case_study(case_study: &CaseStudy) {
    println!("ID: {}", case_study.id);
    println!("Title: {}", case_study.title);
    println!("Client: {}", case_study.client);
    println!("Category: {}", case_study.category);
    println!("Year: {}", case_study.year);
    println!("Team size: {}", case_study.team_size);
    if !case_study.project_duration.is_empty() {
        println!("Duration: {}", case_study.project_duration);
    }
    println!("Featured: {}", case_study.featured);
    if let Some(url) = &case_study.website_url {
        println!("Website: {}", url);
    }
    if !case_study.features.is_empty() {
        println!("Features: {}", case_study.features.join(", "));
    }
    for image in &case_study.gallery_images {
        println!("Gallery: {}", image);
    }
    println!();
    println!("{}", case_study.description);
    if let Some(detail) = &case_study.detailed_description {
        println!();
        println!("{}", detail);
    }
}
