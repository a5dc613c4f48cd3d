pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::TomlConfig;

pub use adapters::{http::GitHubSource, storage::LocalStorage};
pub use app::ShowcasePipeline;
pub use crate::core::{
    cards::{CategoryFilter, ProjectCard},
    catalog::{PriorityTable, ProjectCatalog, UNRANKED},
    engine::ShowcaseEngine,
    ranking::{select_top_projects, RepoRanker},
};
pub use domain::model::{EnrichedRepository, ProjectDetails, RepositorySummary};
pub use utils::error::{Result, ShowcaseError};
