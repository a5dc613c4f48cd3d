use crate::core::{RepoSource, RepositorySummary};
use crate::utils::error::{Result, ShowcaseError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("repo-showcase/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client for the GitHub "list repositories for a user" endpoint.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
    api_base: Url,
}

impl GitHubSource {
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        Self::builder(api_base).build()
    }

    pub fn builder(api_base: impl Into<String>) -> GitHubSourceBuilder {
        GitHubSourceBuilder {
            api_base: api_base.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// `user` is percent-encoded as a single path segment.
    pub fn repos_url(&self, user: &str, per_page: u32) -> String {
        let mut url = self.api_base.clone();
        // build() rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", user, "repos"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("sort", "updated")
            .append_pair("per_page", &per_page.to_string());
        url.into()
    }
}

pub struct GitHubSourceBuilder {
    api_base: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl GitHubSourceBuilder {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GitHubSource> {
        let invalid = |reason: String| ShowcaseError::InvalidConfigValueError {
            field: "source.api_base".to_string(),
            value: self.api_base.clone(),
            reason,
        };
        let api_base = Url::parse(&self.api_base).map_err(|e| invalid(e.to_string()))?;
        if api_base.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        let mut builder = Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(GitHubSource {
            client: builder.build()?,
            api_base,
        })
    }
}

/// Decodes a listing entry by entry. Entries that are not objects are skipped.
pub fn parse_listing(body: serde_json::Value) -> Result<Vec<RepositorySummary>> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(ShowcaseError::MalformedRecord {
                index: 0,
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            })
        }
    };

    let mut repos = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            let err = ShowcaseError::MalformedRecord {
                index,
                message: format!("expected an object, got {}", json_kind(&item)),
            };
            tracing::warn!("Skipping entry: {}", err);
            continue;
        }
        match serde_json::from_value::<RepositorySummary>(item) {
            Ok(repo) => repos.push(repo),
            Err(e) => {
                let err = ShowcaseError::MalformedRecord {
                    index,
                    message: e.to_string(),
                };
                tracing::warn!("Skipping entry: {}", err);
            }
        }
    }
    Ok(repos)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl RepoSource for GitHubSource {
    async fn list_repositories(&self, user: &str, per_page: u32) -> Result<Vec<RepositorySummary>> {
        let url = self.repos_url(user, per_page);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(ShowcaseError::HttpStatusError {
                status: status.as_u16(),
                url,
            });
        }

        let body: serde_json::Value = response.json().await?;
        parse_listing(body)
    }
}
