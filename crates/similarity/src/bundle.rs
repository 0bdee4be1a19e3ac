//! Bundle similarity scoring: top-K average of pairwise chunk cosine scores.

use semgraph_core::config::SimilarityConfig;
use semgraph_core::ids::canonical_pair;
use semgraph_core::model::{ChunkPairScore, SimilarityEdge, SimilarityMethod};
use semgraph_core::vector::dot;
use semgraph_core::{ChunkId, FnId};
use std::cmp::Ordering;

/// A function's chunks paired with their (assumed-normalized) embedding
/// vectors, as gathered by the caller from the chunk/embedding stores.
pub type ChunkVectors<'a> = &'a [(ChunkId, &'a [f32])];

/// Enumerates all chunk pairs between two functions, scores each with a
/// plain dot product (chunk vectors are *not* re-normalized here — this is
/// a contract with the external embedding model: it hands us vectors
/// already normalized the way it wants them compared), sorts descending,
/// and averages the top `top_k`.
///
/// Returns `(bundle_similarity, top_pairs)`; `top_pairs` has at most `top_k`
/// entries, clamped to the number of available chunk pairs.
pub fn bundle_similarity(
    a_chunks: ChunkVectors<'_>,
    b_chunks: ChunkVectors<'_>,
    top_k: usize,
) -> (f32, Vec<ChunkPairScore>) {
    let mut scores: Vec<(usize, usize, f32)> = Vec::with_capacity(a_chunks.len() * b_chunks.len());
    for (ai, (_, av)) in a_chunks.iter().enumerate() {
        for (bi, (_, bv)) in b_chunks.iter().enumerate() {
            scores.push((ai, bi, dot(av, bv)));
        }
    }
    scores.sort_by(|x, y| y.2.partial_cmp(&x.2).unwrap_or(Ordering::Equal));

    let k = top_k.min(scores.len());
    let top = &scores[..k];
    let avg = if k == 0 {
        0.0
    } else {
        top.iter().map(|s| s.2).sum::<f32>() / k as f32
    };
    let top_pairs = top
        .iter()
        .map(|&(ai, bi, score)| ChunkPairScore {
            a: a_chunks[ai].0.clone(),
            b: b_chunks[bi].0.clone(),
            score,
        })
        .collect();
    (avg, top_pairs)
}

/// Scores a single candidate pair end to end: computes the bundle
/// similarity, discards it below `similarity_threshold`, otherwise emits a
/// canonicalized [`SimilarityEdge`].
#[allow(clippy::too_many_arguments)]
pub fn score_pair(
    fn_a: &FnId,
    a_chunks: ChunkVectors<'_>,
    rep_a: &[f32],
    fn_b: &FnId,
    b_chunks: ChunkVectors<'_>,
    rep_b: &[f32],
    cfg: &SimilarityConfig,
    method: SimilarityMethod,
) -> Option<SimilarityEdge> {
    let (bundle, top_pairs) = bundle_similarity(a_chunks, b_chunks, cfg.bundle_top_k);
    if bundle < cfg.similarity_threshold {
        return None;
    }
    let rep_sim = dot(rep_a, rep_b);
    let (source, target) = canonical_pair(fn_a.clone(), fn_b.clone());
    Some(SimilarityEdge {
        source,
        target,
        similarity: bundle,
        method,
        representative_similarity: rep_sim,
        top_pairs,
    })
}
