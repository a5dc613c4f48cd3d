use crate::domain::model::{EnrichedRepository, RepositorySummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn user(&self) -> &str;
    fn per_page(&self) -> u32;
    fn limit(&self) -> usize;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

/// Where raw repository listings come from.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_repositories(&self, user: &str, per_page: u32) -> Result<Vec<RepositorySummary>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RepositorySummary>>;
    async fn transform(&self, data: Vec<RepositorySummary>) -> Result<Vec<EnrichedRepository>>;
    async fn load(&self, result: Vec<EnrichedRepository>) -> Result<String>;
}
