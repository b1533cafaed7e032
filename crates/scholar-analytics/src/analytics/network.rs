//! Co-authorship network.
//!
//! Every paper contributes one edge per unordered pair of its distinct
//! authors. This costs O(Σ aᵢ²) over papers with aᵢ authors; bylines are
//! short, so the nested loop stays.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{Paper, PaperId};

/// Per-author aggregate, rebuilt on every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStat {
    /// Papers the author appears on.
    pub papers: usize,
    /// Citations of those papers, saturating at `u64::MAX`.
    pub citations: u64,
    /// Venues the author published in.
    pub venues: BTreeSet<String>,
    /// Distinct co-authors.
    pub collaborators: BTreeSet<String>,
}

/// Paper that produced an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePaper {
    /// Paper identifier as loaded.
    pub id: PaperId,
    /// Paper title.
    pub title: String,
    /// Publication year.
    pub year: i32,
    /// Citation count.
    pub citations: u64,
}

/// Weighted co-authorship relation. `source < target` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationEdge {
    /// Lexicographically smaller author.
    pub source: String,
    /// Lexicographically larger author.
    pub target: String,
    /// Number of shared papers.
    pub weight: usize,
    /// Shared papers in load order.
    pub papers: Vec<EdgePaper>,
}

impl CollaborationEdge {
    /// Check if `author` is one end of this edge.
    #[must_use]
    pub fn touches(&self, author: &str) -> bool {
        self.source == author || self.target == author
    }
}

/// Graph node: an author and their aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorNode {
    /// Author name.
    pub id: String,
    /// Papers the author appears on.
    pub papers: usize,
    /// Citations of those papers.
    pub citations: u64,
    /// Distinct co-authors.
    pub collaborator_count: usize,
    /// Venues the author published in, sorted.
    pub venues: Vec<String>,
}

/// Entry of the "most collaborative authors" ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorRank {
    /// Author name.
    pub author: String,
    /// Distinct co-authors.
    pub collaborators: usize,
    /// Papers the author appears on.
    pub papers: usize,
}

/// Aggregate network metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    /// Distinct authors.
    pub author_count: usize,
    /// Distinct co-author pairs.
    pub edge_count: usize,
    /// Mean distinct co-authors per author.
    pub average_collaborators_per_author: f64,
    /// Longest paper list on any single edge; 0 without edges.
    pub largest_collaboration_group: usize,
    /// Authors by co-author count, ties by name.
    pub most_collaborative_authors: Vec<CollaboratorRank>,
}

/// Collaboration graph plus metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationNetwork {
    /// Sorted by author name.
    pub nodes: Vec<AuthorNode>,
    /// Sorted by `(source, target)`.
    pub edges: Vec<CollaborationEdge>,
    /// Aggregate metrics over the graph.
    pub metrics: NetworkMetrics,
}

impl CollaborationNetwork {
    /// Look up the edge between two authors, in either order.
    #[must_use]
    pub fn edge(&self, a: &str, b: &str) -> Option<&CollaborationEdge> {
        let (source, target) = canonical_pair(a, b);
        self.edges
            .binary_search_by(|e| (e.source.as_str(), e.target.as_str()).cmp(&(source, target)))
            .ok()
            .map(|i| &self.edges[i])
    }

    /// Edges touching `author`, heaviest first.
    #[must_use]
    pub fn edges_of(&self, author: &str) -> Vec<&CollaborationEdge> {
        let mut edges: Vec<_> = self.edges.iter().filter(|e| e.touches(author)).collect();
        edges.sort_by(|a, b| b.weight.cmp(&a.weight));
        edges
    }
}

/// Sort an author pair so `(A, B)` and `(B, A)` share a key.
#[must_use]
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Build author aggregates and co-authorship edges in one pass.
#[must_use]
pub fn build_graph(
    papers: &[Paper],
) -> (BTreeMap<String, AuthorStat>, BTreeMap<(String, String), CollaborationEdge>) {
    let mut authors: BTreeMap<String, AuthorStat> = BTreeMap::new();
    let mut edges: BTreeMap<(String, String), CollaborationEdge> = BTreeMap::new();

    for paper in papers {
        let byline = paper.distinct_authors();

        for &author in &byline {
            let stat = authors.entry(author.to_string()).or_default();
            stat.papers += 1;
            stat.citations = stat.citations.saturating_add(paper.citations);
            stat.venues.insert(paper.venue.clone());
        }

        for (i, &first) in byline.iter().enumerate() {
            for &second in &byline[i + 1..] {
                let (source, target) = canonical_pair(first, second);
                let edge = edges
                    .entry((source.to_string(), target.to_string()))
                    .or_insert_with(|| CollaborationEdge {
                        source: source.to_string(),
                        target: target.to_string(),
                        weight: 0,
                        papers: Vec::new(),
                    });
                edge.weight += 1;
                edge.papers.push(EdgePaper {
                    id: paper.id.clone(),
                    title: paper.title.clone(),
                    year: paper.year,
                    citations: paper.citations,
                });

                if let Some(stat) = authors.get_mut(first) {
                    stat.collaborators.insert(second.to_string());
                }
                if let Some(stat) = authors.get_mut(second) {
                    stat.collaborators.insert(first.to_string());
                }
            }
        }
    }

    (authors, edges)
}

/// Build the collaboration network and its metrics.
///
/// `top_n` bounds the most-collaborative ranking; ties are broken by author
/// name so repeated runs agree.
#[must_use]
pub fn collaboration_network(papers: &[Paper], top_n: usize) -> CollaborationNetwork {
    let (authors, edges) = build_graph(papers);

    let average_collaborators_per_author = if authors.is_empty() {
        0.0
    } else {
        authors.values().map(|s| s.collaborators.len()).sum::<usize>() as f64
            / authors.len() as f64
    };

    let largest_collaboration_group = edges.values().map(|e| e.papers.len()).max().unwrap_or(0);

    // BTreeMap iteration is name-ordered and the sort is stable.
    let mut ranking: Vec<CollaboratorRank> = authors
        .iter()
        .map(|(author, stat)| CollaboratorRank {
            author: author.clone(),
            collaborators: stat.collaborators.len(),
            papers: stat.papers,
        })
        .collect();
    ranking.sort_by(|a, b| b.collaborators.cmp(&a.collaborators));
    ranking.truncate(top_n);

    let metrics = NetworkMetrics {
        author_count: authors.len(),
        edge_count: edges.len(),
        average_collaborators_per_author,
        largest_collaboration_group,
        most_collaborative_authors: ranking,
    };

    let nodes = authors
        .into_iter()
        .map(|(id, stat)| AuthorNode {
            id,
            papers: stat.papers,
            citations: stat.citations,
            collaborator_count: stat.collaborators.len(),
            venues: stat.venues.into_iter().collect(),
        })
        .collect();

    tracing::debug!(authors = metrics.author_count, edges = metrics.edge_count, "Built collaboration network");

    CollaborationNetwork { nodes, edges: edges.into_values().collect(), metrics }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: i32, authors: &[&str]) -> Paper {
        Paper::new(id, format!("Paper {id}"), authors, 2020, "V", 1)
    }

    #[test]
    fn test_two_paper_scenario_edges() {
        let papers = vec![
            Paper::new(1, "Graph Algorithms", &["A", "B"], 2020, "X", 10),
            Paper::new(2, "Graph Theory", &["B", "C"], 2021, "Y", 5),
        ];
        let network = collaboration_network(&papers, 10);

        let pairs: Vec<(&str, &str, usize)> = network
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
            .collect();
        assert_eq!(pairs, vec![("A", "B", 1), ("B", "C", 1)]);
        assert_eq!(network.metrics.most_collaborative_authors[0].author, "B");
    }

    #[test]
    fn test_pair_is_canonical() {
        let papers = vec![paper(1, &["Zed", "Amy"]), paper(2, &["Amy", "Zed"])];
        let network = collaboration_network(&papers, 10);
        assert_eq!(network.edges.len(), 1);
        let edge = network.edge("Zed", "Amy").unwrap();
        assert_eq!(edge.weight, 2);
        assert_eq!(edge.papers.len(), 2);
        assert_eq!(network.metrics.largest_collaboration_group, 2);
    }

    #[test]
    fn test_repeated_author_makes_no_self_loop() {
        let papers = vec![paper(1, &["A", "A", "B"])];
        let network = collaboration_network(&papers, 10);
        assert!(network.edges.iter().all(|e| e.source != e.target));
        assert_eq!(network.edges.len(), 1);
        assert_eq!(network.nodes.iter().find(|n| n.id == "A").unwrap().papers, 1);
    }

    #[test]
    fn test_single_author_papers_have_no_edges() {
        let papers = vec![paper(1, &["Solo"])];
        let network = collaboration_network(&papers, 10);
        assert!(network.edges.is_empty());
        assert_eq!(network.metrics.largest_collaboration_group, 0);
        assert_eq!(network.nodes.len(), 1);
    }

    #[test]
    fn test_ranking_ties_break_by_name() {
        let papers = vec![paper(1, &["D", "C"]), paper(2, &["B", "A"])];
        let network = collaboration_network(&papers, 3);
        let names: Vec<&str> = network
            .metrics
            .most_collaborative_authors
            .iter()
            .map(|r| r.author.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_average_collaborators() {
        let papers = vec![paper(1, &["A", "B", "C"])];
        let network = collaboration_network(&papers, 10);
        assert!((network.metrics.average_collaborators_per_author - 2.0).abs() < f64::EPSILON);
        assert_eq!(network.edges_of("A").len(), 2);
    }
}
