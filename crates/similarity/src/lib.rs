#![doc = r#"
semgraph-similarity — Aggregation, candidate generation, bundle scoring,
graph assembly, and benchmarking.

Everything in this crate is synchronous: pairwise similarity and projection
scoring are data-parallel over disjoint pairs/functions via `rayon`, but the
crate itself performs no I/O and never suspends, per the workspace's
concurrency model.
"#]

pub mod aggregate;
pub mod benchmark;
pub mod bundle;
pub mod candidates;
pub mod graph;

pub use aggregate::aggregate_corpus;
pub use benchmark::{run_benchmark, BenchmarkReport, BenchmarkVariant, VariantReport};
pub use bundle::{bundle_similarity, score_pair, ChunkVectors};
pub use candidates::{approximate_candidates, exact_candidates, generate_candidates, CandidateList};
pub use graph::{assemble_graph, cap_neighbors, GraphPayload};
