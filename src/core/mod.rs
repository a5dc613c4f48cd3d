pub mod cards;
pub mod catalog;
pub mod engine;
pub mod ranking;

pub use crate::domain::model::{EnrichedRepository, ProjectDetails, RepositorySummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RepoSource, Storage};
pub use crate::utils::error::Result;
