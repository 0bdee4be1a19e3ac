#![doc = r#"
semgraph-core — Data model, vector primitives, fingerprinting, and
configuration shared across the semgraph workspace.

This crate has no I/O and no async surface: everything here is synchronous
and, per the workspace's concurrency model, must not suspend. Heavier
components (chunking, candidate generation, persistence, worker dispatch)
live in sibling crates and build on top of the types defined here.
"#]

pub mod arc_str;
pub mod config;
pub mod fingerprint;
pub mod ids;
pub mod model;
pub mod vector;
pub mod worker_protocol;

pub use arc_str::ArcStr;
pub use ids::{ChunkId, FnId};
pub use model::{
    CallEdge, Chunk, Embedding, Function, FunctionEmbedding, ResolutionStatus, SimilarityEdge,
};
