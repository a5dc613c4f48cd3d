use crate::domain::model::{EnrichedRepository, ProjectCategory};
use serde::Serialize;

pub const NO_DESCRIPTION: &str = "No description available";

/// CSV header, in `ProjectCard` field order.
pub const CARD_FIELDS: [&str; 12] = [
    "id",
    "name",
    "title",
    "description",
    "language",
    "stars",
    "forks",
    "url",
    "live_url",
    "category",
    "demo_available",
    "publication_available",
];

/// What the presentation layer needs to draw one project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub description: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
    pub live_url: Option<String>,
    pub category: Option<String>,
    pub demo_available: bool,
    pub publication_available: bool,
}

impl From<&EnrichedRepository> for ProjectCard {
    fn from(repo: &EnrichedRepository) -> Self {
        let summary = &repo.summary;
        Self {
            id: summary.id,
            name: summary.name.clone(),
            title: repo.display_name().to_string(),
            description: summary
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language: summary.language.clone(),
            stars: summary.stargazers_count,
            forks: summary.forks_count,
            url: summary.html_url.clone(),
            live_url: repo.details.as_ref().and_then(|d| d.live_url.clone()),
            category: repo.category().map(|c| c.label().to_string()),
            demo_available: repo.demo_available(),
            publication_available: repo.publication_available(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl CategoryFilter {
    pub fn parse(id: &str) -> Option<Self> {
        if id.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        ProjectCategory::parse(id).map(CategoryFilter::Only)
    }

    pub fn matches(&self, repo: &EnrichedRepository) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => repo.category() == Some(*category),
        }
    }
}

/// Cards for an already ranked list. Filtering keeps the ranked order.
pub fn build_cards(ranked: &[EnrichedRepository], filter: CategoryFilter) -> Vec<ProjectCard> {
    ranked
        .iter()
        .filter(|repo| filter.matches(repo))
        .map(ProjectCard::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DemoDescriptor, ProjectDetails, Publication, RepositorySummary};

    fn summary(name: &str, description: Option<&str>) -> RepositorySummary {
        RepositorySummary {
            id: 7,
            name: name.to_string(),
            description: description.map(str::to_string),
            html_url: format!("https://github.com/someone/{}", name),
            language: Some("Rust".to_string()),
            stargazers_count: 3,
            forks_count: 1,
            updated_at: None,
        }
    }

    #[test]
    fn test_card_without_details() {
        let repo = EnrichedRepository::new(summary("plain", None), None);
        let card = ProjectCard::from(&repo);
        assert_eq!(card.title, "plain");
        assert_eq!(card.description, NO_DESCRIPTION);
        assert!(!card.demo_available);
        assert!(!card.publication_available);
        assert_eq!(card.category, None);
    }

    #[test]
    fn test_card_with_details() {
        let details = ProjectDetails {
            title: Some("Fancy".to_string()),
            demo: DemoDescriptor::Embedded {
                url: "https://fancy.example.com".to_string(),
            },
            category: Some(ProjectCategory::Web),
            live_url: Some("https://fancy.example.com".to_string()),
            publication: Some(Publication {
                url: "https://arxiv.org/abs/1".to_string(),
                title: "Paper".to_string(),
                venue: "arXiv".to_string(),
                date: "2024".to_string(),
            }),
            ..Default::default()
        };
        let repo = EnrichedRepository::new(summary("fancy", Some("A site")), Some(details));
        let card = ProjectCard::from(&repo);
        assert_eq!(card.title, "Fancy");
        assert_eq!(card.description, "A site");
        assert_eq!(card.category.as_deref(), Some("Web Apps"));
        assert!(card.demo_available);
        assert!(card.publication_available);
    }

    #[test]
    fn test_category_filter_keeps_order() {
        let ai = ProjectDetails {
            category: Some(ProjectCategory::Ai),
            ..Default::default()
        };
        let ranked = vec![
            EnrichedRepository::new(summary("one", None), Some(ai.clone())),
            EnrichedRepository::new(summary("two", None), None),
            EnrichedRepository::new(summary("three", None), Some(ai)),
        ];

        let filter = CategoryFilter::parse("ai").unwrap();
        let cards = build_cards(&ranked, filter);
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);

        assert_eq!(build_cards(&ranked, CategoryFilter::All).len(), 3);
        assert_eq!(CategoryFilter::parse("ALL"), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("desktop"), None);
    }

    #[test]
    fn test_card_fields_match_serialized_header() {
        let repo = EnrichedRepository::new(summary("plain", None), None);
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(ProjectCard::from(&repo)).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(data.lines().next().unwrap(), CARD_FIELDS.join(","));
    }
}
