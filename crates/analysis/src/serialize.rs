//! Flattens a [`GraphPayload`] plus an [`AnalysisOutcome`] into the
//! `{nodes[], edges[]}` structure consumed by the visualisation front-end
//! and graph-worker query surface.

use crate::protocol::AnalysisOutcome;
use semgraph_core::FnId;
use semgraph_similarity::GraphPayload;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub community: Option<u32>,
    /// One entry per centrality measure computed for this node.
    pub centrality: Option<Vec<f32>>,
    pub core_number: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Call,
    Similarity,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub similarity: Option<f32>,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub undirected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CliqueRecord {
    pub members: Vec<String>,
}

/// The final flat graph sent to callers: every node from `graph.nodes`
/// (plus its analysis attributes, when available) and every edge from
/// both edge families, tagged by `type` and `undirected`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub cliques: Vec<CliqueRecord>,
    pub via_worker: bool,
}

pub fn build_graph_report(graph: &GraphPayload, outcome: &AnalysisOutcome, via_worker: bool) -> GraphReport {
    let nodes = graph
        .nodes
        .iter()
        .map(|id| {
            let attrs = outcome.node_analysis.get(id);
            NodeRecord {
                id: id.as_str().to_string(),
                community: attrs.and_then(|a| a.community),
                centrality: attrs.and_then(|a| a.centrality.clone()),
                core_number: attrs.and_then(|a| a.core_number),
            }
        })
        .collect();

    let mut edges: Vec<EdgeRecord> = graph
        .similarity_edges
        .iter()
        .map(|e| EdgeRecord {
            source: e.source.as_str().to_string(),
            target: e.target.as_str().to_string(),
            weight: e.similarity,
            similarity: Some(e.similarity),
            kind: EdgeKind::Similarity,
            undirected: true,
        })
        .collect();
    edges.extend(graph.call_edges.iter().map(|e| EdgeRecord {
        source: e.source.as_str().to_string(),
        target: e.target.as_str().to_string(),
        weight: e.weight,
        similarity: None,
        kind: EdgeKind::Call,
        undirected: false,
    }));

    let cliques = outcome
        .cliques
        .iter()
        .map(|members| CliqueRecord {
            members: members.iter().map(FnId::to_string).collect(),
        })
        .collect();

    GraphReport {
        nodes,
        edges,
        cliques,
        via_worker,
    }
}
