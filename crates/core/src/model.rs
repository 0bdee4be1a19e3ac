//! The entity model.

use crate::ids::{canonical_pair, ChunkId, FnId};
use serde::{Deserialize, Serialize};
use serde_json::Map as JsonMap;

/// A byte range `[start, end)` into a file's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

/// A 1-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// A tokenized, parsed function.
///
/// Identity (`fn_id`) is stable across runs as long as the underlying
/// source does not change; see [`crate::fingerprint`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub fn_id: FnId,
    pub name: String,
    pub file_path: String,
    pub lang: String,
    pub byte_range: ByteRange,
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub source: Option<String>,
    /// Language-specific metrics (cyclomatic complexity, LOC, ...), opaque
    /// to this crate.
    pub metrics: Option<JsonMap<String, serde_json::Value>>,
}

/// An ordered slice of a function's source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub fn_id: FnId,
    pub index: usize,
    pub byte_range: ByteRange,
    pub start: LineCol,
    pub end: LineCol,
    pub token_count: usize,
    pub text: String,
}

/// A chunk's raw embedding vector, as produced by the (external) embedding
/// model. Not required to be unit-norm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    pub chunk_id: ChunkId,
    pub vector: Vec<f32>,
}

/// A function's aggregated representation: its chunks plus a unit-norm
/// representative vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionEmbedding {
    pub fn_id: FnId,
    pub function: Function,
    pub chunks: Vec<Chunk>,
    /// `None` until an aggregator has computed it; a `FunctionEmbedding`
    /// with a `None` representative is dropped before candidate generation
    ///.
    pub representative: Option<Vec<f32>>,
    pub chunk_count: usize,
}

impl FunctionEmbedding {
    pub fn new(function: Function, chunks: Vec<Chunk>) -> Self {
        let chunk_count = chunks.len();
        Self {
            fn_id: function.fn_id.clone(),
            function,
            chunks,
            representative: None,
            chunk_count,
        }
    }
}

/// An undirected similarity edge between two functions. Endpoints are canonicalized: `source < target`
/// lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: FnId,
    pub target: FnId,
    pub similarity: f32,
    pub method: SimilarityMethod,
    pub representative_similarity: f32,
    pub top_pairs: Vec<ChunkPairScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    Exact,
    Approximate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPairScore {
    pub a: ChunkId,
    pub b: ChunkId,
    pub score: f32,
}

impl SimilarityEdge {
    /// Builds an edge with canonicalized endpoint order.
    pub fn new(
        a: FnId,
        b: FnId,
        similarity: f32,
        method: SimilarityMethod,
        representative_similarity: f32,
        top_pairs: Vec<ChunkPairScore>,
    ) -> Self {
        let (source, target) = canonical_pair(a, b);
        Self {
            source,
            target,
            similarity,
            method,
            representative_similarity,
            top_pairs,
        }
    }

    pub fn canonical_key(&self) -> String {
        crate::ids::canonical_edge_key(&self.source, &self.target)
    }
}

/// Resolution status for a call edge's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Resolved,
    Ambiguous,
    Unresolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
}

/// A directed call-graph edge from the external parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEdge {
    pub source: FnId,
    pub target: FnId,
    pub weight: f32,
    pub is_dynamic: bool,
    pub resolution_status: ResolutionStatus,
    pub call_sites: Vec<CallSite>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_edge_canonicalizes_endpoints() {
        let edge = SimilarityEdge::new(
            FnId::from("zzz"),
            FnId::from("aaa"),
            0.9,
            SimilarityMethod::Exact,
            0.9,
            vec![],
        );
        assert_eq!(edge.source.as_str(), "aaa");
        assert_eq!(edge.target.as_str(), "zzz");
    }

    #[test]
    fn function_embedding_tracks_chunk_count() {
        let f = Function {
            fn_id: FnId::from("f"),
            name: "f".into(),
            file_path: "a.rs".into(),
            lang: "rust".into(),
            byte_range: ByteRange { start: 0, end: 10 },
            start_line: 1,
            end_line: 2,
            start_col: 0,
            end_col: 1,
            source: None,
            metrics: None,
        };
        let fe = FunctionEmbedding::new(f, vec![]);
        assert_eq!(fe.chunk_count, 0);
        assert!(fe.representative.is_none());
    }
}
