//! Relational map: seed text → nodes and depth-bounded weighted edges.
//!
//! # Construction
//!
//! 1. Lowercase the seed and split on whitespace
//! 2. Link consecutive tokens in an undirected adjacency graph
//! 3. From every distinct token, walk breadth-first up to `td_max` hops and
//!    emit `(token, reached, weight)` for each node reached, the token itself
//!    included at hop 0
//! 4. Keep the first `edge_cap` edges
//!
//! Every edge carries the same constant weight. Hop distance does not decay
//! it.
//!
//! Tokens keep first-occurrence order and neighbors are visited in that same
//! order, so the edge list is a pure function of `(seed, td_max)`.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

/// A weighted directed relation between two nodes.
///
/// Serializes as a `[source, target, weight]` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, String, f64)", into = "(String, String, f64)")]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// True if this edge links `source` to `target` (in that direction).
    pub fn links(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

impl From<(String, String, f64)> for Edge {
    fn from((source, target, weight): (String, String, f64)) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl From<Edge> for (String, String, f64) {
    fn from(edge: Edge) -> Self {
        (edge.source, edge.target, edge.weight)
    }
}

/// Parameters that fully determine a relational map for a given seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphParams {
    /// Hop bound for the traversal.
    pub td_max: usize,
    /// Maximum number of edges kept.
    pub edge_cap: usize,
    /// Weight assigned to every edge.
    pub edge_weight: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            td_max: 3,
            edge_cap: 20,
            edge_weight: 0.8,
        }
    }
}

/// Nodes and edges extracted from a seed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationalMap {
    /// Distinct lowercase tokens, in first-occurrence order.
    pub nodes: Vec<String>,
    /// Capped edge list.
    pub edges: Vec<Edge>,
}

impl RelationalMap {
    /// Build the relational map for `seed`.
    pub fn build(seed: &str, params: GraphParams) -> Self {
        let words = tokenize(seed);

        let mut graph: UnGraph<&str, f64> = UnGraph::new_undirected();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();
        for word in &words {
            index
                .entry(word.as_str())
                .or_insert_with(|| graph.add_node(word.as_str()));
        }
        for pair in words.windows(2) {
            let a = index[pair[0].as_str()];
            let b = index[pair[1].as_str()];
            graph.update_edge(a, b, params.edge_weight);
        }

        // Node indices follow first-occurrence order.
        let nodes: Vec<String> = graph.node_indices().map(|n| graph[n].to_string()).collect();

        let mut edges = Vec::new();
        'outer: for start in graph.node_indices() {
            for reached in within_hops(&graph, start, params.td_max) {
                if edges.len() >= params.edge_cap {
                    break 'outer;
                }
                edges.push(Edge::new(graph[start], graph[reached], params.edge_weight));
            }
        }

        tracing::trace!(
            nodes = nodes.len(),
            edges = edges.len(),
            td_max = params.td_max,
            "built relational map"
        );

        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check whether any edge links `source` to `target`.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.iter().any(|e| e.links(source, target))
    }
}

/// Lowercase whitespace tokenization.
pub fn tokenize(seed: &str) -> Vec<String> {
    seed.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Breadth-first walk from `start`, stopping after `max_hops` levels.
///
/// Returns reached nodes in visit order, `start` first.
fn within_hops<N, E>(graph: &UnGraph<N, E>, start: NodeIndex, max_hops: usize) -> Vec<NodeIndex> {
    let mut seen = vec![false; graph.node_count()];
    seen[start.index()] = true;

    let mut order = vec![start];
    let mut frontier = vec![start];

    for _ in 0..max_hops {
        let mut next = Vec::new();
        for &node in &frontier {
            let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
            neighbors.sort_unstable();
            for neighbor in neighbors {
                if !seen[neighbor.index()] {
                    seen[neighbor.index()] = true;
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        order.extend_from_slice(&next);
        frontier = next;
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(seed: &str, td_max: usize) -> RelationalMap {
        RelationalMap::build(
            seed,
            GraphParams {
                td_max,
                ..GraphParams::default()
            },
        )
    }

    #[test]
    fn empty_seed_has_no_edges() {
        let map = build("", 3);
        assert!(map.nodes.is_empty());
        assert!(map.is_empty());

        let map = build("   \t\n ", 3);
        assert!(map.nodes.is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn single_word_only_reaches_itself() {
        let map = build("Latency", 3);
        assert_eq!(map.nodes, vec!["latency"]);
        assert_eq!(map.edges, vec![Edge::new("latency", "latency", 0.8)]);
    }

    #[test]
    fn nodes_are_distinct_and_lowercase() {
        let map = build("Echo echo ECHO chamber", 3);
        assert_eq!(map.nodes, vec!["echo", "chamber"]);
    }

    #[test]
    fn adjacency_pairs_present_in_both_directions() {
        let map = build("debug latency in software poetic rhymes", 3);
        assert!(map.has_edge("debug", "latency"));
        assert!(map.has_edge("latency", "debug"));
        assert!(map.has_edge("latency", "in"));
        assert!(map.has_edge("in", "software"));
    }

    #[test]
    fn edges_are_capped() {
        let map = build("debug latency in software poetic rhymes", 3);
        assert_eq!(map.edge_count(), 20);

        let long = (0..40).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(build(&long, 5).edge_count(), 20);
    }

    #[test]
    fn depth_bound_limits_reach() {
        // a - b - c - d - e
        let map = build("a b c d e", 1);
        assert!(map.has_edge("a", "b"));
        assert!(!map.has_edge("a", "c"));

        let map = build("a b c d e", 2);
        assert!(map.has_edge("a", "c"));
        assert!(!map.has_edge("a", "d"));
    }

    #[test]
    fn zero_depth_emits_self_edges_only() {
        let map = build("a b c", 0);
        assert_eq!(
            map.edges,
            vec![
                Edge::new("a", "a", 0.8),
                Edge::new("b", "b", 0.8),
                Edge::new("c", "c", 0.8),
            ]
        );
    }

    #[test]
    fn traversal_order_is_breadth_first() {
        let map = build("a b c", 3);
        let from_b: Vec<&str> = map
            .edges
            .iter()
            .filter(|e| e.source == "b")
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(from_b, vec!["b", "a", "c"]);
    }

    #[test]
    fn weight_is_constant_regardless_of_hops() {
        let map = build("a b c d", 3);
        assert!(map.edges.iter().all(|e| e.weight == 0.8));
        assert!(map.has_edge("a", "d"));
    }

    #[test]
    fn repeated_tokens_do_not_duplicate_edges() {
        let map = build("loop back loop back", 3);
        assert_eq!(map.nodes, vec!["loop", "back"]);
        assert_eq!(map.edge_count(), 4);
    }

    proptest::proptest! {
        #[test]
        fn cap_and_weight_hold_for_any_seed(seed in "[a-e ]{0,40}", td_max in 0usize..6) {
            let map = build(&seed, td_max);
            proptest::prop_assert!(map.edge_count() <= 20);
            proptest::prop_assert!(map.edges.iter().all(|e| e.weight == 0.8));
            for edge in &map.edges {
                proptest::prop_assert!(map.nodes.contains(&edge.source));
                proptest::prop_assert!(map.nodes.contains(&edge.target));
            }
        }
    }

    #[test]
    fn edge_serializes_as_triple() {
        let json = serde_json::to_string(&Edge::new("a", "b", 0.8)).unwrap();
        assert_eq!(json, r#"["a","b",0.8]"#);
        let edge: Edge = serde_json::from_str(r#"["x","y",0.5]"#).unwrap();
        assert_eq!(edge, Edge::new("x", "y", 0.5));
    }
}
