//! Candidate generation: exact O(n^2) or approximate banded-projection LSH.

use rayon::prelude::*;
use semgraph_core::config::SimilarityConfig;
use semgraph_core::vector::{dot, random_unit_vector, seeded_random};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Per-function candidate list: `(candidate_index, representative_score)`,
/// sorted by score descending.
pub type CandidateList = Vec<(usize, f32)>;

/// Dispatches to the exact or approximate path: approximate iff
/// `cfg.force_approximate` or `n >= approximate_threshold` (nonzero).
pub fn generate_candidates(reps: &[Vec<f32>], cfg: &SimilarityConfig) -> Vec<CandidateList> {
    let n = reps.len();
    if n < 2 {
        return vec![Vec::new(); n];
    }
    if cfg.use_approximate(n) {
        tracing::debug!(n, "using approximate candidate generation");
        approximate_candidates(reps, cfg)
    } else {
        tracing::debug!(n, "using exact candidate generation");
        exact_candidates(reps, cfg.candidate_limit)
    }
}

/// All pairs `(i,j)`, `i<j`; each node keeps its top `candidate_limit` by
/// score, symmetrically.
pub fn exact_candidates(reps: &[Vec<f32>], candidate_limit: usize) -> Vec<CandidateList> {
    let n = reps.len();
    let mut per_node: Vec<CandidateList> = vec![Vec::new(); n];
    if n < 2 {
        return per_node;
    }

    let pairs: Vec<(usize, usize, f32)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n).map(move |j| (i, j, dot(&reps[i], &reps[j])))
        })
        .collect();

    for (i, j, score) in pairs {
        per_node[i].push((j, score));
        per_node[j].push((i, score));
    }
    for list in per_node.iter_mut() {
        sort_desc(list);
        list.truncate(candidate_limit);
    }
    per_node
}

/// Random-projection banded LSH:
/// 1. Draw `P` random unit vectors.
/// 2. Project every representative onto each.
/// 3. Sort indices by each projection's scores.
/// 4. Connect each index to its `B` neighbours on either side within each
///    sorted order, keeping the min absolute-distance key on duplicates.
/// 5. Re-score every collected candidate with the true dot product, sort
///    descending, truncate to `min(candidate_limit * oversample, n-1)`.
pub fn approximate_candidates(reps: &[Vec<f32>], cfg: &SimilarityConfig) -> Vec<CandidateList> {
    let n = reps.len();
    let mut per_node: Vec<CandidateList> = vec![Vec::new(); n];
    if n < 2 {
        return per_node;
    }
    let dim = reps[0].len();
    let approx = cfg.approximate.clamped(n);

    let mut rng = seeded_random(approx.seed);
    let projections: Vec<Vec<f32>> = (0..approx.projection_count)
        .map(|_| random_unit_vector(dim, &mut rng))
        .collect();

    let mut candidate_dist: Vec<HashMap<usize, f32>> = vec![HashMap::new(); n];

    for projection in &projections {
        let mut scored: Vec<(usize, f32)> = (0..n).map(|i| (i, dot(&reps[i], projection))).collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        for pos in 0..scored.len() {
            let (i, si) = scored[pos];
            let lo = pos.saturating_sub(approx.band_size);
            let hi = (pos + approx.band_size).min(scored.len() - 1);
            for npos in lo..=hi {
                if npos == pos {
                    continue;
                }
                let (j, sj) = scored[npos];
                let d = (si - sj).abs();
                let entry = candidate_dist[i].entry(j).or_insert(f32::INFINITY);
                if d < *entry {
                    *entry = d;
                }
            }
        }
    }

    let limit = (cfg.candidate_limit.saturating_mul(approx.oversample_factor)).min(n - 1);
    for i in 0..n {
        let mut scored: Vec<(usize, f32)> = candidate_dist[i]
            .keys()
            .map(|&j| (j, dot(&reps[i], &reps[j])))
            .collect();
        sort_desc(&mut scored);
        scored.truncate(limit);
        per_node[i] = scored;
    }
    per_node
}

/// Sorts by score descending, breaking ties by index ascending so the
/// result is independent of the candidate list's incoming order (the
/// approximate path collects candidates from a `HashMap`, whose iteration
/// order is not deterministic across instances even for identical input).
fn sort_desc(list: &mut [(usize, f32)]) {
    list.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
}
