//! The external analysis-collaborator contract, and its inline fallback.

use crate::inline::{core_numbers, degree_centrality, label_propagation_communities, maximal_cliques, UndirectedAdjacency};
use crate::protocol::{AnalysisOptions, AnalysisOutcome, NodeAnalysis, WorkerAnalysisError};
use async_trait::async_trait;
use semgraph_similarity::GraphPayload;
use std::collections::HashMap;

/// The contract a real graph-analysis worker (PageRank/Louvain/Bron–Kerbosch/
/// k-core, running in a separate process or thread pool) must satisfy. The
/// core only invokes this behind [`crate::dispatcher::AnalysisDispatcher`]
/// and serializes whatever it returns — the worker's internals are not
/// specified here.
#[async_trait]
pub trait AnalysisWorker: Send + Sync {
    async fn analyze(
        &self,
        graph: &GraphPayload,
        options: &AnalysisOptions,
    ) -> Result<AnalysisOutcome, WorkerAnalysisError>;
}

/// Synchronous fallback used when no external worker is configured, or when
/// one fails. Label-propagation-degree-peeling rather than whatever the real
/// worker runs (see `crate::inline`'s module docs) — good enough to keep a
/// run returning a usable graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineAnalysisWorker;

#[async_trait]
impl AnalysisWorker for InlineAnalysisWorker {
    async fn analyze(
        &self,
        graph: &GraphPayload,
        options: &AnalysisOptions,
    ) -> Result<AnalysisOutcome, WorkerAnalysisError> {
        let edges: Vec<_> = graph
            .similarity_edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        let adj = UndirectedAdjacency::build(&graph.nodes, &edges);

        let centralities = options.centralities.then(|| degree_centrality(&adj));
        let communities = options.communities.then(|| label_propagation_communities(&adj, 20));
        let core = options.centralities.then(|| core_numbers(&adj));
        let cliques = if options.cliques {
            maximal_cliques(&adj)
        } else {
            Vec::new()
        };

        let mut node_analysis = HashMap::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            node_analysis.insert(
                node.clone(),
                NodeAnalysis {
                    community: communities.as_ref().and_then(|c| c.get(node)).copied(),
                    // Degree centrality is the only measure the inline
                    // fallback computes, so its vector is a single entry.
                    centrality: centralities.as_ref().and_then(|c| c.get(node)).map(|v| vec![*v]),
                    core_number: core.as_ref().and_then(|c| c.get(node)).copied(),
                },
            );
        }

        Ok(AnalysisOutcome {
            node_analysis,
            cliques,
        })
    }
}

/// A worker double that always fails; exercises the dispatcher's fallback
/// path in tests.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFailingWorker;

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl AnalysisWorker for AlwaysFailingWorker {
    async fn analyze(
        &self,
        _graph: &GraphPayload,
        _options: &AnalysisOptions,
    ) -> Result<AnalysisOutcome, WorkerAnalysisError> {
        Err(WorkerAnalysisError("worker stub: always fails".to_string()))
    }
}
