use crate::core::cards::{build_cards, CategoryFilter, ProjectCard, CARD_FIELDS};
use crate::core::catalog::{PriorityTable, ProjectCatalog};
use crate::core::ranking::select_top_projects;
use crate::core::{ConfigProvider, EnrichedRepository, Pipeline, RepoSource, RepositorySummary, Storage};
use crate::utils::error::{Result, ShowcaseError};

pub const JSON_FILENAME: &str = "projects.json";
pub const CSV_FILENAME: &str = "projects.csv";

pub struct ShowcasePipeline<S: Storage, C: ConfigProvider, R: RepoSource> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) source: R,
    pub(crate) catalog: ProjectCatalog,
    pub(crate) priority: PriorityTable,
    pub(crate) filter: CategoryFilter,
}

impl<S: Storage, C: ConfigProvider, R: RepoSource> ShowcasePipeline<S, C, R> {
    /// Starts with the built-in catalog and priority table.
    pub fn new(storage: S, config: C, source: R) -> Self {
        Self {
            storage,
            config,
            source,
            catalog: ProjectCatalog::builtin().clone(),
            priority: PriorityTable::builtin().clone(),
            filter: CategoryFilter::All,
        }
    }

    pub fn with_catalog(mut self, catalog: ProjectCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_priority(mut self, priority: PriorityTable) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The header row is written even when there are no cards.
    fn render_csv(cards: &[ProjectCard]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CARD_FIELDS)?;
        for card in cards {
            writer.serialize(card)?;
        }
        writer
            .into_inner()
            .map_err(|e| ShowcaseError::IoError(e.into_error()))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: RepoSource> Pipeline for ShowcasePipeline<S, C, R> {
    /// A failed fetch is logged and yields an empty listing.
    async fn extract(&self) -> Result<Vec<RepositorySummary>> {
        match self
            .source
            .list_repositories(self.config.user(), self.config.per_page())
            .await
        {
            Ok(repos) => Ok(repos),
            Err(e) if e.is_network_failure() => {
                tracing::error!("Error fetching repos: {}", e);
                tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::error!("Discarding unreadable listing: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn transform(&self, data: Vec<RepositorySummary>) -> Result<Vec<EnrichedRepository>> {
        let ranked = select_top_projects(data, &self.catalog, &self.priority, self.config.limit());
        for (position, repo) in ranked.iter().enumerate() {
            tracing::debug!(
                "#{} {} (stars={}, forks={}, rank={}, curated={})",
                position + 1,
                repo.name(),
                repo.summary.stargazers_count,
                repo.summary.forks_count,
                self.priority.rank(repo.name()),
                repo.details.is_some()
            );
        }
        Ok(ranked)
    }

    async fn load(&self, result: Vec<EnrichedRepository>) -> Result<String> {
        let cards = build_cards(&result, self.filter);
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            match format.as_str() {
                // The ranked list is written whole; the filter only narrows the cards.
                "json" => {
                    let data = serde_json::to_vec_pretty(&result)?;
                    self.storage.write_file(JSON_FILENAME, &data).await?;
                    written.push(JSON_FILENAME);
                }
                "csv" => {
                    let data = Self::render_csv(&cards)?;
                    self.storage.write_file(CSV_FILENAME, &data).await?;
                    written.push(CSV_FILENAME);
                }
                other => tracing::warn!("Ignoring unsupported output format: {}", other),
            }
        }

        tracing::debug!("Wrote {} cards to {:?}", cards.len(), written);
        Ok(self.config.output_path().to_string())
    }
}
