//! Embedding worker protocol.
//!
//! This is the wire contract for the external embedding-model collaborator:
//! message envelopes correlated by `request_id`, with `init`/`embed-chunks`
//! requests and `init-done`/`embed-chunks-result`/`error` responses. The
//! analysis worker (`semgraph-analysis`) uses an isomorphic envelope/
//! correlation-id shape built on the same [`RequestId`] type.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing correlation id for in-flight worker requests.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Issues strictly increasing [`RequestId`]s, one per pending-request table.
#[derive(Debug, Default)]
pub struct RequestIdGenerator(AtomicU64);

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> RequestId {
        RequestId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single chunk submitted for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedChunkInput {
    pub id: String,
    pub text: String,
}

/// `embed-chunks` request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedChunksPayload {
    pub chunks: Vec<EmbedChunkInput>,
    pub batch_size: usize,
}

/// One embedded chunk in an `embed-chunks-result` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedChunkOutput {
    pub chunk_id: String,
    pub vector: Vec<f32>,
}

/// `init-done` / `embed-chunks-result` shared metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    pub backend: String,
    pub model_id: String,
    pub dimension: u32,
}

/// `embed-chunks-result` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedChunksResult {
    pub embeddings: Vec<EmbedChunkOutput>,
    #[serde(flatten)]
    pub backend: BackendInfo,
}

/// A worker-reported error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerErrorPayload {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub cause: Option<String>,
}

/// Request payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WorkerRequest {
    Init,
    EmbedChunks(EmbedChunksPayload),
}

/// Response payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WorkerResponse {
    InitDone(BackendInfo),
    EmbedChunksResult(EmbedChunksResult),
    Error(WorkerErrorPayload),
}

/// Envelope wrapping a request with its correlation id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub request_id: RequestId,
    #[serde(flatten)]
    pub payload: WorkerRequest,
}

/// Envelope wrapping a response with the correlation id it answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub request_id: RequestId,
    #[serde(flatten)]
    pub payload: WorkerResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_increase_monotonically() {
        let gen = RequestIdGenerator::new();
        let a = gen.next();
        let b = gen.next();
        assert!(b.0 > a.0);
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let env = RequestEnvelope {
            request_id: RequestId(7),
            payload: WorkerRequest::EmbedChunks(EmbedChunksPayload {
                chunks: vec![EmbedChunkInput {
                    id: "c1".into(),
                    text: "fn foo() {}".into(),
                }],
                batch_size: 8,
            }),
        };
        let json = serde_json::to_string(&env).unwrap();
        let back: RequestEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back.request_id, RequestId(7));
    }
}
