use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of a hosting provider's "list repositories for user" response.
///
/// Decoding is lenient: missing or non-numeric counts become 0 and a missing
/// or unparseable `updated_at` becomes `None`, which orders before any real
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    #[serde(default, deserialize_with = "lenient_count")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub html_url: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub forks_count: u64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Backend,
    Ai,
    Game,
    Cli,
    Automation,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 7] = [
        ProjectCategory::Web,
        ProjectCategory::Mobile,
        ProjectCategory::Backend,
        ProjectCategory::Ai,
        ProjectCategory::Game,
        ProjectCategory::Cli,
        ProjectCategory::Automation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Backend => "backend",
            Self::Ai => "ai",
            Self::Game => "game",
            Self::Cli => "cli",
            Self::Automation => "automation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Web => "Web Apps",
            Self::Mobile => "Mobile",
            Self::Backend => "Backend",
            Self::Ai => "AI/ML",
            Self::Game => "Games",
            Self::Cli => "CLI Tools",
            Self::Automation => "Automations",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(id.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSample {
    pub method: String,
    pub path: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_request: Option<serde_json::Value>,
    pub sample_response: serde_json::Value,
}

/// How a project's demo is shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemoDescriptor {
    Embedded {
        url: String,
    },
    Video {
        url: String,
    },
    Api {
        base_url: String,
        samples: Vec<ApiSample>,
    },
    Screenshots {
        images: Vec<String>,
    },
    Interactive {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    #[default]
    None,
}

impl DemoDescriptor {
    pub fn is_available(&self) -> bool {
        !matches!(self, DemoDescriptor::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub url: String,
    pub title: String,
    pub venue: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub metric: String,
    pub value: String,
}

/// Curated metadata for one repository, keyed by repository name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub demo: DemoDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<Publication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performance_metrics: Vec<PerformanceMetric>,
}

/// A fetched summary with curated details attached.
///
/// The summary is held as-is, so enrichment can only add information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRepository {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProjectDetails>,
}

impl EnrichedRepository {
    pub fn new(summary: RepositorySummary, details: Option<ProjectDetails>) -> Self {
        Self { summary, details }
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Curated title when one exists, otherwise the repository name.
    pub fn display_name(&self) -> &str {
        self.details
            .as_ref()
            .and_then(|d| d.title.as_deref())
            .unwrap_or(&self.summary.name)
    }

    pub fn category(&self) -> Option<ProjectCategory> {
        self.details.as_ref().and_then(|d| d.category)
    }

    pub fn demo_available(&self) -> bool {
        self.details
            .as_ref()
            .map(|d| d.demo.is_available())
            .unwrap_or(false)
    }

    pub fn publication_available(&self) -> bool {
        self.details
            .as_ref()
            .map(|d| d.publication.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_decodes_github_shape() {
        let json = serde_json::json!({
            "id": 42,
            "name": "NEAT-cars",
            "description": "Cars that learn to drive",
            "html_url": "https://github.com/someone/NEAT-cars",
            "language": "Python",
            "stargazers_count": 7,
            "forks_count": 2,
            "updated_at": "2024-03-01T12:00:00Z",
            "fork": false,
            "visibility": "public"
        });

        let repo: RepositorySummary = serde_json::from_value(json).unwrap();
        assert_eq!(repo.id, 42);
        assert_eq!(repo.stargazers_count, 7);
        assert_eq!(repo.language.as_deref(), Some("Python"));
        assert!(repo.updated_at.is_some());
    }

    #[test]
    fn test_summary_defaults_missing_fields() {
        let json = serde_json::json!({
            "name": "half-record",
            "stargazers_count": null,
            "updated_at": "not a date"
        });

        let repo: RepositorySummary = serde_json::from_value(json).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.updated_at, None);
        assert_eq!(repo.html_url, "");
    }

    #[test]
    fn test_demo_descriptor_tagging() {
        let demo: DemoDescriptor =
            serde_json::from_value(serde_json::json!({"kind": "video", "url": "/videos/a.mp4"}))
                .unwrap();
        assert_eq!(
            demo,
            DemoDescriptor::Video {
                url: "/videos/a.mp4".to_string()
            }
        );
        assert!(demo.is_available());
        assert!(!DemoDescriptor::default().is_available());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(ProjectCategory::parse("AI"), Some(ProjectCategory::Ai));
        assert_eq!(ProjectCategory::parse("cli"), Some(ProjectCategory::Cli));
        assert_eq!(ProjectCategory::parse("desktop"), None);
        assert_eq!(ProjectCategory::Ai.label(), "AI/ML");
    }

    #[test]
    fn test_display_name_prefers_title() {
        let summary = RepositorySummary {
            id: 1,
            name: "DiagramsToCode".to_string(),
            description: None,
            html_url: String::new(),
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: None,
        };
        let plain = EnrichedRepository::new(summary.clone(), None);
        assert_eq!(plain.display_name(), "DiagramsToCode");

        let details = ProjectDetails {
            title: Some("Diagrams To Code".to_string()),
            ..Default::default()
        };
        let enriched = EnrichedRepository::new(summary, Some(details));
        assert_eq!(enriched.display_name(), "Diagrams To Code");
        assert_eq!(enriched.name(), "DiagramsToCode");
    }
}
