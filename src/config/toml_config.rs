use crate::adapters::http::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use crate::core::catalog::{PriorityTable, ProjectCatalog};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ShowcaseError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub ranking: RankingConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_base: String,
    pub user: String,
    pub per_page: u32,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user: String::new(),
            per_page: 20,
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub limit: usize,
    /// Merged over the built-in table unless `builtin_priority` is false.
    pub priority: HashMap<String, u32>,
    pub builtin_priority: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: 6,
            priority: HashMap::new(),
            builtin_priority: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<String>,
    pub builtin: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            builtin: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["json".to_string(), "csv".to_string()],
        }
    }
}

static ENV_VAR: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.api_base", &self.source.api_base)?;
        if self.source.user.trim().is_empty() {
            return Err(ShowcaseError::MissingConfigError {
                field: "source.user".to_string(),
            });
        }
        if !self
            .source
            .user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ShowcaseError::InvalidConfigValueError {
                field: "source.user".to_string(),
                value: self.source.user.clone(),
                reason: "Account names may only contain ASCII letters, digits and '-'".to_string(),
            });
        }
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        // Provider caps a single page at 100 entries.
        validation::validate_range("source.per_page", self.source.per_page, 1, 100)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        if let Some(path) = &self.catalog.path {
            validation::validate_path("catalog.path", path)?;
        }
        PriorityTable::try_from(self.ranking.priority.clone())?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    pub fn priority_table(&self) -> Result<PriorityTable> {
        let mut table = if self.ranking.builtin_priority {
            PriorityTable::builtin().clone()
        } else {
            PriorityTable::new()
        };
        let overrides = PriorityTable::try_from(self.ranking.priority.clone())?;
        table.merge(&overrides);
        Ok(table)
    }

    pub fn project_catalog(&self) -> Result<ProjectCatalog> {
        let mut catalog = if self.catalog.builtin {
            ProjectCatalog::builtin().clone()
        } else {
            ProjectCatalog::new()
        };
        if let Some(path) = &self.catalog.path {
            catalog.merge(ProjectCatalog::from_file(path)?);
        }
        Ok(catalog)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base(&self) -> &str {
        &self.source.api_base
    }

    fn user(&self) -> &str {
        &self.source.user
    }

    fn per_page(&self) -> u32 {
        self.source.per_page
    }

    fn limit(&self) -> usize {
        self.ranking.limit
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[source]
user = "octocat"
per_page = 30

[ranking]
limit = 4

[ranking.priority]
hello-world = 1

[output]
output_path = "./site-data"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.user(), "octocat");
        assert_eq!(config.per_page(), 30);
        assert_eq!(config.limit(), 4);
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.output_formats(), &["json".to_string()]);
        assert!(config.validate().is_ok());

        let table = config.priority_table().unwrap();
        assert_eq!(table.rank("hello-world"), 1);
        assert_eq!(table.rank("DiagramsToCode"), 1);
    }

    #[test]
    fn test_defaults_match_listing_request() {
        let config = TomlConfig::default();
        assert_eq!(config.per_page(), 20);
        assert_eq!(config.limit(), 6);
        assert!(config.timeout().is_none());
        // No user configured yet.
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ShowcaseError::MissingConfigError { ref field } if field == "source.user"
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHOWCASE_TEST_USER", "someone");

        let toml_content = r#"
[source]
user = "${SHOWCASE_TEST_USER}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.user, "someone");

        std::env::remove_var("SHOWCASE_TEST_USER");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
api_base = "invalid-url"
user = "octocat"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let bad_format = r#"
[source]
user = "octocat"

[output]
formats = ["xml"]
"#;
        let config = TomlConfig::from_toml_str(bad_format).unwrap();
        assert!(config.validate().is_err());

        let zero_rank = r#"
[source]
user = "octocat"

[ranking.priority]
x = 0
"#;
        let config = TomlConfig::from_toml_str(zero_rank).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_user_must_be_a_plain_account_name() {
        for user in ["a?b", "a/b", "a b", "a#b", "ä"] {
            let mut config = TomlConfig::default();
            config.source.user = user.to_string();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ShowcaseError::InvalidConfigValueError { ref field, .. } if field == "source.user"),
                "{user} should be rejected"
            );
        }

        let mut config = TomlConfig::default();
        config.source.user = "some-user-42".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builtin_tables_can_be_disabled() {
        let toml_content = r#"
[source]
user = "octocat"

[ranking]
builtin_priority = false

[catalog]
builtin = false
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.priority_table().unwrap().is_empty());
        assert!(config.project_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_config_from_file_with_catalog_overlay() {
        let mut catalog_file = NamedTempFile::new().unwrap();
        catalog_file
            .write_all(b"[hello-world]\ntitle = \"Hello\"\ncategory = \"web\"\n")
            .unwrap();

        let mut config_file = NamedTempFile::new().unwrap();
        let content = format!(
            "[source]\nuser = \"octocat\"\n\n[catalog]\npath = {:?}\n",
            catalog_file.path().to_str().unwrap()
        );
        config_file.write_all(content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(config_file.path()).unwrap();
        let catalog = config.project_catalog().unwrap();
        assert_eq!(
            catalog.get("hello-world").unwrap().title.as_deref(),
            Some("Hello")
        );
        assert!(catalog.get("NEAT-cars").is_some());
    }
}
