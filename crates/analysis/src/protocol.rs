//! Analysis-dispatch wire/API shapes.
//!
//! The analysis worker protocol is isomorphic to the embedding worker
//! protocol in `semgraph_core::worker_protocol`: requests and responses
//! correlated by a monotonically increasing [`semgraph_core::worker_protocol::RequestId`].
//! Here the payloads are graph-shaped instead of chunk-shaped.

use semgraph_core::FnId;
use serde::{Deserialize, Serialize};

/// What the caller wants computed. Any subset may be requested; an
/// implementation that cannot produce one simply omits it from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub centralities: bool,
    pub communities: bool,
    pub cliques: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            centralities: true,
            communities: true,
            cliques: true,
        }
    }
}

/// Per-node analysis attributes. Fields are `None` when the corresponding
/// [`AnalysisOptions`] flag was not requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeAnalysis {
    pub community: Option<u32>,
    /// A centrality vector: one entry per centrality measure computed for
    /// this node (e.g. `[degree]`, or `[degree, betweenness]` once a worker
    /// computes more than one), in a fixed, worker-defined measure order.
    pub centrality: Option<Vec<f32>>,
    pub core_number: Option<u32>,
}

/// The raw result of one analysis run: maximal cliques plus per-node
/// attributes, keyed by `fn_id`. Serialization into the flat
/// `{nodes[], edges[]}` shape happens in [`crate::serialize`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub node_analysis: std::collections::HashMap<FnId, NodeAnalysis>,
    pub cliques: Vec<Vec<FnId>>,
}

/// An analysis worker failure. Distinct from [`semgraph_error::Error`]
/// because a failure here never aborts the run — it triggers the
/// dispatcher's inline fallback: `WorkerFailure` on the analysis worker
/// degrades silently, while the embedding worker's failure propagates.
#[derive(Debug, Clone, thiserror::Error)]
#[error("analysis worker failure: {0}")]
pub struct WorkerAnalysisError(pub String);
