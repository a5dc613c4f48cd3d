use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "repo-showcase")]
#[command(about = "Builds the top-projects section of a portfolio from a GitHub account")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Account whose public repositories are listed
    #[arg(short, long)]
    pub user: Option<String>,

    /// Base URL of the hosting provider's REST API
    #[arg(long)]
    pub api_base: Option<String>,

    /// Number of repositories requested from the listing endpoint
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Number of projects kept after ranking
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[arg(short, long)]
    pub output_path: Option<String>,

    /// Curated project details to merge over the built-in table
    #[arg(long)]
    pub catalog: Option<String>,

    /// Only emit cards in this category (web, backend, ai, ...)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Print the known categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Show the request that would be made without fetching anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// Loads the config file when one is given, then applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(user) = &self.user {
            config.source.user = user.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.source.api_base = api_base.clone();
        }
        if let Some(per_page) = self.per_page {
            config.source.per_page = per_page;
        }
        if let Some(limit) = self.limit {
            config.ranking.limit = limit;
        }
        if let Some(output_path) = &self.output_path {
            config.output.output_path = output_path.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog.path = Some(catalog.clone());
        }
    }
}
