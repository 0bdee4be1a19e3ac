//! Synchronous inline computation of centralities, communities, cliques,
//! and k-core numbers, used as the fallback when the external analysis
//! collaborator is unavailable.
//!
//! These are deliberately simple, well-understood graph algorithms (degree
//! centrality, label propagation, Bron–Kerbosch without pivoting,
//! degeneracy-ordering k-core) rather than a reimplementation of whatever
//! the real worker runs — the contract only requires that the inline path
//! produce a plausible, internally-consistent set of attributes over the
//! same undirected adjacency.

use semgraph_core::FnId;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Plain undirected adjacency over `fn_id`s, built once and shared by every
/// inline algorithm in this module.
pub struct UndirectedAdjacency {
    pub nodes: Vec<FnId>,
    adjacency: HashMap<FnId, HashSet<FnId>>,
}

impl UndirectedAdjacency {
    pub fn build(nodes: &[FnId], edges: &[(FnId, FnId)]) -> Self {
        let mut adjacency: HashMap<FnId, HashSet<FnId>> =
            nodes.iter().map(|n| (n.clone(), HashSet::new())).collect();
        for (a, b) in edges {
            adjacency.entry(a.clone()).or_default().insert(b.clone());
            adjacency.entry(b.clone()).or_default().insert(a.clone());
        }
        Self {
            nodes: nodes.to_vec(),
            adjacency,
        }
    }

    pub fn degree(&self, node: &FnId) -> usize {
        self.adjacency.get(node).map(|n| n.len()).unwrap_or(0)
    }

    pub fn neighbors(&self, node: &FnId) -> impl Iterator<Item = &FnId> {
        self.adjacency.get(node).into_iter().flatten()
    }
}

/// Degree centrality normalized by `n - 1` (0 for a single-node graph).
pub fn degree_centrality(adj: &UndirectedAdjacency) -> HashMap<FnId, f32> {
    let denom = (adj.nodes.len().saturating_sub(1)).max(1) as f32;
    adj.nodes
        .iter()
        .map(|n| (n.clone(), adj.degree(n) as f32 / denom))
        .collect()
}

/// Synchronous label propagation: each node starts in its own community and
/// repeatedly adopts the most common label among its neighbours, breaking
/// ties by the smallest label id for determinism. Converges when no node
/// changes, capped at `max_iterations` to guarantee termination.
pub fn label_propagation_communities(adj: &UndirectedAdjacency, max_iterations: usize) -> HashMap<FnId, u32> {
    let mut order: Vec<FnId> = adj.nodes.clone();
    order.sort();

    let mut label: HashMap<FnId, u32> = order
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), i as u32))
        .collect();

    for _ in 0..max_iterations {
        let mut changed = false;
        for node in &order {
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for neighbor in adj.neighbors(node) {
                if let Some(&l) = label.get(neighbor) {
                    *counts.entry(l).or_insert(0) += 1;
                }
            }
            if counts.is_empty() {
                continue;
            }
            let best = counts
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
                .map(|(label, _)| label)
                .unwrap();
            if label.get(node) != Some(&best) {
                label.insert(node.clone(), best);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Renumber to small dense ids, ordered by first appearance in sorted
    // node order, so output is deterministic independent of the raw label
    // values produced above.
    let mut renumbered: HashMap<u32, u32> = HashMap::new();
    let mut next_id = 0u32;
    let mut out = HashMap::with_capacity(order.len());
    for node in &order {
        let raw = label[node];
        let id = *renumbered.entry(raw).or_insert_with(|| {
            let id = next_id;
            next_id += 1;
            id
        });
        out.insert(node.clone(), id);
    }
    out
}

/// Degeneracy ordering k-core: repeatedly removes the minimum-degree node
/// (in the residual graph), assigning it a core number equal to the
/// maximum degree seen so far at the time of removal.
pub fn core_numbers(adj: &UndirectedAdjacency) -> HashMap<FnId, u32> {
    let mut residual_degree: HashMap<FnId, usize> =
        adj.nodes.iter().map(|n| (n.clone(), adj.degree(n))).collect();
    let mut removed: HashSet<FnId> = HashSet::new();
    let mut core: HashMap<FnId, u32> = HashMap::with_capacity(adj.nodes.len());
    let mut running_max = 0usize;

    let mut order: Vec<FnId> = adj.nodes.clone();
    order.sort();

    for _ in 0..order.len() {
        let next = order
            .iter()
            .filter(|n| !removed.contains(*n))
            .min_by_key(|n| (residual_degree[*n], (*n).clone()))
            .cloned();
        let Some(node) = next else { break };
        running_max = running_max.max(residual_degree[&node]);
        core.insert(node.clone(), running_max as u32);
        removed.insert(node.clone());
        for neighbor in adj.neighbors(&node) {
            if !removed.contains(neighbor) {
                if let Some(d) = residual_degree.get_mut(neighbor) {
                    *d = d.saturating_sub(1);
                }
            }
        }
    }
    core
}

/// Bron–Kerbosch without pivoting: every maximal clique in the graph.
/// Cubic-ish in dense graphs; the caller is expected to invoke this on the
/// neighbor-capped similarity graph, which keeps degree bounded.
pub fn maximal_cliques(adj: &UndirectedAdjacency) -> Vec<Vec<FnId>> {
    let mut cliques = Vec::new();
    let all: HashSet<FnId> = adj.nodes.iter().cloned().collect();
    bron_kerbosch(adj, HashSet::new(), all, HashSet::new(), &mut cliques);
    for clique in &mut cliques {
        clique.sort();
    }
    cliques.sort();
    cliques
}

fn bron_kerbosch(
    adj: &UndirectedAdjacency,
    r: HashSet<FnId>,
    mut p: HashSet<FnId>,
    mut x: HashSet<FnId>,
    out: &mut Vec<Vec<FnId>>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() > 1 {
            out.push(r.into_iter().collect());
        }
        return;
    }
    let candidates: Vec<FnId> = p.iter().cloned().collect();
    for node in candidates {
        let neighbors: HashSet<FnId> = adj.neighbors(&node).cloned().collect();
        let mut r_next = r.clone();
        r_next.insert(node.clone());
        let p_next: HashSet<FnId> = p.intersection(&neighbors).cloned().collect();
        let x_next: HashSet<FnId> = x.intersection(&neighbors).cloned().collect();
        bron_kerbosch(adj, r_next, p_next, x_next, out);
        p.remove(&node);
        x.insert(node);
    }
}
