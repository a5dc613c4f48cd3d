//! Repository ranking and enrichment.
//!
//! `select_top_projects` filters a raw listing, orders it by an explicit list
//! of sort keys, keeps the first `limit` records and attaches curated details.
//! It performs no I/O and cannot fail.

use crate::core::catalog::{PriorityTable, ProjectCatalog};
use crate::domain::model::{EnrichedRepository, RepositorySummary};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    PriorityRank,
    Forks,
    UpdatedAt,
}

impl SortKey {
    /// Ascending comparison on this key alone.
    pub fn compare(
        &self,
        a: &RepositorySummary,
        b: &RepositorySummary,
        priority: &PriorityTable,
    ) -> Ordering {
        match self {
            SortKey::Stars => a.stargazers_count.cmp(&b.stargazers_count),
            SortKey::PriorityRank => priority.rank(&a.name).cmp(&priority.rank(&b.name)),
            SortKey::Forks => a.forks_count.cmp(&b.forks_count),
            // None sorts before every timestamp.
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingKey {
    pub key: SortKey,
    pub direction: Direction,
}

impl OrderingKey {
    pub const fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    pub fn compare(
        &self,
        a: &RepositorySummary,
        b: &RepositorySummary,
        priority: &PriorityTable,
    ) -> Ordering {
        let ordering = self.key.compare(a, b, priority);
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Stars, then manual priority, then forks, then recency.
pub const DEFAULT_ORDER: [OrderingKey; 4] = [
    OrderingKey::new(SortKey::Stars, Direction::Descending),
    OrderingKey::new(SortKey::PriorityRank, Direction::Ascending),
    OrderingKey::new(SortKey::Forks, Direction::Descending),
    OrderingKey::new(SortKey::UpdatedAt, Direction::Descending),
];

/// Keeps a record unless its name mentions "fork" and nobody has starred or forked it.
///
/// The check looks at the name, not the provider's fork flag, so an unstarred
/// repository called "forklift" is dropped too.
pub fn is_included(repo: &RepositorySummary) -> bool {
    !repo.name.contains("fork") || repo.stargazers_count > 0 || repo.forks_count > 0
}

pub struct RepoRanker<'a> {
    catalog: &'a ProjectCatalog,
    priority: &'a PriorityTable,
    order: Vec<OrderingKey>,
}

impl<'a> RepoRanker<'a> {
    pub fn new(catalog: &'a ProjectCatalog, priority: &'a PriorityTable) -> Self {
        Self {
            catalog,
            priority,
            order: DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn with_order(mut self, order: Vec<OrderingKey>) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> &[OrderingKey] {
        &self.order
    }

    /// Lexicographic comparison over the configured keys.
    pub fn compare(&self, a: &RepositorySummary, b: &RepositorySummary) -> Ordering {
        self.order
            .iter()
            .map(|k| k.compare(a, b, self.priority))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    pub fn enrich(&self, summary: RepositorySummary) -> EnrichedRepository {
        let details = self.catalog.get(&summary.name).cloned();
        EnrichedRepository::new(summary, details)
    }

    pub fn select_top(&self, raw: Vec<RepositorySummary>, limit: usize) -> Vec<EnrichedRepository> {
        if limit == 0 {
            return Vec::new();
        }

        let total = raw.len();
        let mut kept: Vec<RepositorySummary> = raw.into_iter().filter(is_included).collect();
        tracing::debug!("Inclusion filter kept {} of {} repositories", kept.len(), total);

        // Stable: equal keys keep input order.
        kept.sort_by(|a, b| self.compare(a, b));
        kept.truncate(limit);

        kept.into_iter().map(|repo| self.enrich(repo)).collect()
    }
}

pub fn select_top_projects(
    raw: Vec<RepositorySummary>,
    details: &ProjectCatalog,
    priority: &PriorityTable,
    limit: usize,
) -> Vec<EnrichedRepository> {
    RepoRanker::new(details, priority).select_top(raw, limit)
}
