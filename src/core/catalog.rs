//! Curated project metadata and the manual priority table.
//!
//! Both ship compiled in. A TOML overlay can add or replace entries at
//! startup; after that they are read-only.

use crate::domain::model::{DemoDescriptor, ProjectCategory, ProjectDetails, Publication};
use crate::utils::error::{Result, ShowcaseError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Rank used for names missing from the priority table.
pub const UNRANKED: u32 = 999;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCatalog {
    entries: HashMap<String, ProjectDetails>,
}

impl ProjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> &'static ProjectCatalog {
        &BUILTIN_CATALOG
    }

    pub fn insert(&mut self, name: impl Into<String>, details: ProjectDetails) {
        self.entries.insert(name.into(), details);
    }

    /// Exact, case-sensitive lookup by repository name.
    pub fn get(&self, name: &str) -> Option<&ProjectDetails> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from `other` win over entries with the same name.
    pub fn merge(&mut self, other: ProjectCatalog) {
        self.entries.extend(other.entries);
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded {} curated entries from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityTable {
    ranks: HashMap<String, u32>,
}

impl PriorityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> &'static PriorityTable {
        &BUILTIN_PRIORITY
    }

    /// Ranks start at 1; lower is more important.
    pub fn insert(&mut self, name: impl Into<String>, rank: u32) -> Result<()> {
        let name = name.into();
        if rank == 0 {
            return Err(ShowcaseError::InvalidConfigValueError {
                field: format!("ranking.priority.{}", name),
                value: rank.to_string(),
                reason: "Priority rank must be a positive integer".to_string(),
            });
        }
        self.ranks.insert(name, rank);
        Ok(())
    }

    pub fn rank(&self, name: &str) -> u32 {
        self.ranks.get(name).copied().unwrap_or(UNRANKED)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn merge(&mut self, other: &PriorityTable) {
        self.ranks
            .extend(other.ranks.iter().map(|(k, v)| (k.clone(), *v)));
    }
}

impl TryFrom<HashMap<String, u32>> for PriorityTable {
    type Error = ShowcaseError;

    fn try_from(ranks: HashMap<String, u32>) -> Result<Self> {
        let mut table = PriorityTable::new();
        for (name, rank) in ranks {
            table.insert(name, rank)?;
        }
        Ok(table)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static BUILTIN_CATALOG: LazyLock<ProjectCatalog> = LazyLock::new(|| {
    let mut catalog = ProjectCatalog::new();

    catalog.insert(
        "NEAT-cars",
        ProjectDetails {
            title: Some("NEAT Cars - Neural Evolution".to_string()),
            detailed_description: Some(
                "An implementation of NeuroEvolution of Augmenting Topologies (NEAT) algorithm \
                 where AI cars learn to navigate user drawn racing tracks through genetic \
                 evolution. Cars start with random behaviors and evolve over several generations \
                 to master driving, developing optimal neural networks through natural \
                 selection."
                    .to_string(),
            ),
            tech_stack: strings(&[
                "Python",
                "Pygame",
                "NEAT Algorithm",
                "Neural Networks",
                "Genetic Algorithm",
                "Machine Learning",
            ]),
            features: strings(&[
                "Real-time neural network evolution",
                "Population-based learning",
                "Dynamic topology evolution",
                "Fitness-based natural selection",
                "Advanced collision detection",
                "User drawn track layouts",
            ]),
            demo: DemoDescriptor::Video {
                url: "/videos/NEATCarsDemo.mp4".to_string(),
            },
            category: Some(ProjectCategory::Ai),
            ..Default::default()
        },
    );

    catalog.insert(
        "DiagramsToCode",
        ProjectDetails {
            title: Some("Diagrams To Code".to_string()),
            detailed_description: Some(
                "An application to automatically generate CloudFormation Infrastructure As \
                 Code (IaC) templates from given AWS architectures."
                    .to_string(),
            ),
            tech_stack: strings(&["Python", "YOLOv8", "Cloud", "Automation", "Machine Learning"]),
            features: strings(&["Automated Cloud Infrastructure Generation"]),
            demo: DemoDescriptor::Video {
                url: "/videos/DiagramsToCodeDemo.mp4".to_string(),
            },
            category: Some(ProjectCategory::Ai),
            publication: Some(Publication {
                url: "https://arxiv.org/abs/your-paper-id".to_string(),
                title: "From Diagrams to Code: An Exploration into Automated Cloud Template \
                        Creation"
                    .to_string(),
                venue: "International Conference on Electronics Information and Emergency \
                        Communication"
                    .to_string(),
                date: "2025".to_string(),
            }),
            ..Default::default()
        },
    );

    catalog.insert(
        "WaveFunctionCollapse",
        ProjectDetails {
            title: Some("Wave Function Collapse".to_string()),
            detailed_description: Some(
                "My implementation of the Wave Function Collapse Algorithm to generate \
                 platforming levels"
                    .to_string(),
            ),
            tech_stack: strings(&["Python", "Pygame", "Wave Function Collapse Algorithm"]),
            features: strings(&["Generation of varying sizes of platforming levels"]),
            demo: DemoDescriptor::Video {
                url: "/videos/WaveFunctionCollapseDemo.mp4".to_string(),
            },
            category: Some(ProjectCategory::Game),
            ..Default::default()
        },
    );

    catalog.insert(
        "Ki",
        ProjectDetails {
            title: Some("Ki".to_string()),
            detailed_description: Some(
                "Ki is an automated Discord bot controller that simulates user activity to \
                 maximize Pokémon capture efficiency in PokéTwo. It leverages Selenium-driven \
                 clients and intelligent task routing to automate spawns, captures, and \
                 marketplace listings."
                    .to_string(),
            ),
            tech_stack: strings(&[
                "Python",
                "Selenium",
                "Heroku",
                "Firebase (Firestore)",
                "Docker",
                "Kubernetes",
                "Discord API",
            ]),
            features: strings(&[
                "Automated spawning and capturing of Pokémon in PokéTwo",
                "Simulated message traffic to trigger spawns",
                "Real-time capture and sale logging to Firebase",
                "Dynamic pricing and listing strategy based on marketplace thresholds",
                "Containerized worker pods managed via Kubernetes",
                "Resilient microservice architecture with modular task routing",
            ]),
            demo: DemoDescriptor::Screenshots {
                images: strings(&["/screenshots/Ki1.png"]),
            },
            category: Some(ProjectCategory::Automation),
            ..Default::default()
        },
    );

    catalog
});

static BUILTIN_PRIORITY: LazyLock<PriorityTable> = LazyLock::new(|| {
    let ranks = [
        ("DiagramsToCode", 1),
        ("NEAT-cars", 2),
        ("Ki", 3),
        ("WaveFunctionCollapse", 4),
    ];
    PriorityTable {
        ranks: ranks
            .into_iter()
            .map(|(name, rank)| (name.to_string(), rank))
            .collect(),
    }
});
