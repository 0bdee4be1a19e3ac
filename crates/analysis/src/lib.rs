#![doc = r#"
semgraph-analysis — Dispatch to the external graph-analysis collaborator
(centralities, communities, cliques) behind a stable interface, with a
synchronous inline fallback.

The real analysis worker (PageRank/Louvain/Bron–Kerbosch/k-core, running as
a separate process or a dedicated thread pool) is an external collaborator
as an external collaborator — this crate only defines the [`AnalysisWorker`] contract,
dispatches to it, and serializes whatever comes back (or, on failure, what
the inline computation in [`inline`] produces) into the flat `{nodes[],
edges[]}` structure the visualisation front-end consumes.
"#]

pub mod cancel;
pub mod dispatcher;
pub mod inline;
pub mod protocol;
pub mod serialize;
pub mod worker;

pub use cancel::{CancellationHandle, CancellationListener, CancellationToken};
pub use dispatcher::{AnalysisDispatcher, DispatchOutcome};
pub use protocol::{AnalysisOptions, AnalysisOutcome, NodeAnalysis, WorkerAnalysisError};
pub use serialize::{build_graph_report, EdgeKind, EdgeRecord, GraphReport, NodeRecord};
pub use worker::{AnalysisWorker, InlineAnalysisWorker};
