//! Graph assembly: de-duplicate, per-node neighbor-cap, and merge with the
//! call graph.

use semgraph_core::model::{CallEdge, SimilarityEdge};
use semgraph_core::FnId;
use std::collections::{HashMap, HashSet};

/// The merged graph payload handed to analysis dispatch: every node
/// referenced by either edge set, the capped similarity edges, and the
/// call edges untouched.
#[derive(Debug, Clone)]
pub struct GraphPayload {
    pub nodes: Vec<FnId>,
    pub similarity_edges: Vec<SimilarityEdge>,
    pub call_edges: Vec<CallEdge>,
}

/// Caps each node's incident similarity edges to `max_neighbors` by
/// similarity descending, retaining an edge if *either* endpoint keeps it
/// (union, not intersection).
///
/// Input edges are first de-duplicated by canonical key (defensive; the
/// bundle scorer already dedups, but this keeps the assembler correct if
/// called with raw input).
pub fn cap_neighbors(edges: &[SimilarityEdge], max_neighbors: usize) -> Vec<SimilarityEdge> {
    let mut dedup: HashMap<String, SimilarityEdge> = HashMap::new();
    for edge in edges {
        dedup.entry(edge.canonical_key()).or_insert_with(|| edge.clone());
    }
    let deduped: Vec<SimilarityEdge> = dedup.into_values().collect();

    let mut adjacency: HashMap<&FnId, Vec<(usize, f32)>> = HashMap::new();
    for (i, edge) in deduped.iter().enumerate() {
        adjacency.entry(&edge.source).or_default().push((i, edge.similarity));
        adjacency.entry(&edge.target).or_default().push((i, edge.similarity));
    }

    let mut keep: HashSet<usize> = HashSet::new();
    for incident in adjacency.values_mut() {
        incident.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for &(idx, _) in incident.iter().take(max_neighbors) {
            keep.insert(idx);
        }
    }

    deduped
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, e)| e)
        .collect()
}

/// Assembles the final graph payload: caps similarity edges, collects the
/// node set from both edge families, and passes call edges through
/// unmodified.
pub fn assemble_graph(
    similarity_edges: Vec<SimilarityEdge>,
    call_edges: Vec<CallEdge>,
    max_neighbors: usize,
) -> GraphPayload {
    let capped = cap_neighbors(&similarity_edges, max_neighbors);

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    let mut push_node = |id: &FnId, seen: &mut HashSet<FnId>, nodes: &mut Vec<FnId>| {
        if seen.insert(id.clone()) {
            nodes.push(id.clone());
        }
    };
    for edge in &capped {
        push_node(&edge.source, &mut seen, &mut nodes);
        push_node(&edge.target, &mut seen, &mut nodes);
    }
    for edge in &call_edges {
        push_node(&edge.source, &mut seen, &mut nodes);
        push_node(&edge.target, &mut seen, &mut nodes);
    }

    GraphPayload {
        nodes,
        similarity_edges: capped,
        call_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraph_core::model::SimilarityMethod;

    fn edge(a: &str, b: &str, sim: f32) -> SimilarityEdge {
        SimilarityEdge::new(
            FnId::from(a),
            FnId::from(b),
            sim,
            SimilarityMethod::Exact,
            sim,
            vec![],
        )
    }

    #[test]
    fn caps_each_node_to_max_neighbors() {
        // star graph: "center" connects to 5 leaves at descending similarity.
        let edges: Vec<_> = (0..5)
            .map(|i| edge("center", &format!("leaf{i}"), 0.9 - i as f32 * 0.01))
            .collect();
        let capped = cap_neighbors(&edges, 3);
        assert_eq!(capped.len(), 3);
        for e in &capped {
            assert!(e.similarity >= 0.9 - 2.0 * 0.01 - 1e-6);
        }
    }

    #[test]
    fn union_rule_retains_hub_asymmetric_edge() {
        // "hub" has many strong edges and caps out a weak one; the weak
        // neighbor itself has few edges, so it keeps that edge in its own
        // top list -- the edge must survive via the union rule.
        let mut edges = vec![edge("hub", "weak", 0.66)];
        for i in 0..5 {
            edges.push(edge("hub", &format!("strong{i}"), 0.9 - i as f32 * 0.001));
        }
        let capped = cap_neighbors(&edges, 3);
        assert!(capped.iter().any(|e| e.canonical_key() == edge("hub", "weak", 0.0).canonical_key()));
    }

    #[test]
    fn duplicate_canonical_edges_are_deduped() {
        let edges = vec![edge("a", "b", 0.7), edge("b", "a", 0.7)];
        let capped = cap_neighbors(&edges, 8);
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn assemble_collects_nodes_from_both_edge_families() {
        let sims = vec![edge("a", "b", 0.8)];
        let calls = vec![CallEdge {
            source: FnId::from("b"),
            target: FnId::from("c"),
            weight: 1.0,
            is_dynamic: false,
            resolution_status: semgraph_core::model::ResolutionStatus::Resolved,
            call_sites: vec![],
        }];
        let payload = assemble_graph(sims, calls, 8);
        let mut ids: Vec<String> = payload.nodes.iter().map(|f| f.as_str().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(payload.call_edges.len(), 1);
    }
}
