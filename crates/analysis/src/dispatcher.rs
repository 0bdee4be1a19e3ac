//! Analysis dispatch: hands the assembled graph to an external worker and
//! falls back to the inline computation on any worker error.
//!
//! A pending-request table keyed by a monotonically increasing
//! [`semgraph_core::worker_protocol::RequestId`] tracks one in-flight entry
//! per call, resolved (or rejected with [`semgraph_error::Error::Cancelled`])
//! when the call completes or the dispatcher is disposed.

use crate::cancel::{CancellationHandle, CancellationToken};
use crate::protocol::{AnalysisOptions, AnalysisOutcome};
use crate::worker::{AnalysisWorker, InlineAnalysisWorker};
use semgraph_core::worker_protocol::{RequestId, RequestIdGenerator};
use semgraph_error::{Error, Result};
use semgraph_similarity::GraphPayload;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// The outcome of one dispatch call: the analysis result plus whether it
/// came from the external worker or the inline fallback.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub outcome: AnalysisOutcome,
    pub via_worker: bool,
}

/// Holds a handle to an external [`AnalysisWorker`] (defaulting to none,
/// i.e. always inline) plus the table of requests currently in flight.
pub struct AnalysisDispatcher {
    worker: Option<Arc<dyn AnalysisWorker>>,
    inline: InlineAnalysisWorker,
    request_ids: RequestIdGenerator,
    pending: Mutex<HashSet<RequestId>>,
    cancel_token: CancellationToken,
    cancel_handle: CancellationHandle,
}

impl AnalysisDispatcher {
    /// A dispatcher with no external worker configured: every call goes
    /// straight to the inline path (`via_worker = false`).
    pub fn inline_only() -> Self {
        let (cancel_token, cancel_handle) = CancellationToken::new();
        Self {
            worker: None,
            inline: InlineAnalysisWorker,
            request_ids: RequestIdGenerator::new(),
            pending: Mutex::new(HashSet::new()),
            cancel_token,
            cancel_handle,
        }
    }

    /// A dispatcher that tries `worker` first, falling back to inline on
    /// any [`crate::protocol::WorkerAnalysisError`].
    pub fn with_worker(worker: Arc<dyn AnalysisWorker>) -> Self {
        let (cancel_token, cancel_handle) = CancellationToken::new();
        Self {
            worker: Some(worker),
            inline: InlineAnalysisWorker,
            request_ids: RequestIdGenerator::new(),
            pending: Mutex::new(HashSet::new()),
            cancel_token,
            cancel_handle,
        }
    }

    /// Runs one analysis dispatch. Validation/construction errors never
    /// abort the run — only [`Error::Cancelled`] (the dispatcher was
    /// disposed) is returned as an `Err`; a worker failure degrades to the
    /// inline path silently.
    pub async fn dispatch(&self, graph: &GraphPayload, options: &AnalysisOptions) -> Result<DispatchOutcome> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let request_id = self.request_ids.next();
        self.pending.lock().expect("pending mutex poisoned").insert(request_id);

        let result = if let Some(worker) = &self.worker {
            match worker.analyze(graph, options).await {
                Ok(outcome) => DispatchOutcome {
                    outcome,
                    via_worker: true,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "analysis worker failed, falling back to inline computation");
                    let outcome = self
                        .inline
                        .analyze(graph, options)
                        .await
                        .expect("inline analysis worker is infallible");
                    DispatchOutcome {
                        outcome,
                        via_worker: false,
                    }
                }
            }
        } else {
            let outcome = self
                .inline
                .analyze(graph, options)
                .await
                .expect("inline analysis worker is infallible");
            DispatchOutcome {
                outcome,
                via_worker: false,
            }
        };

        self.pending.lock().expect("pending mutex poisoned").remove(&request_id);

        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(result)
    }

    /// Marks the dispatcher cancelled: the current in-flight call (if any)
    /// and every subsequent `dispatch` call returns [`Error::Cancelled`].
    pub fn cancel(&self) {
        self.cancel_handle.cancel();
    }

    /// Number of calls currently in flight (always 0 or 1 for this
    /// single-threaded-at-the-API-surface dispatcher; exposed for tests).
    pub fn pending_count(&self) -> usize {
        self.pending.lock().expect("pending mutex poisoned").len()
    }
}
