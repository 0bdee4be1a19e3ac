//! End-to-end scenarios: a three-function triangle with one clear edge,
//! and approximate-vs-exact recall/precision on a larger corpus. Colocated
//! as a crate-level `tests/` integration test alongside the per-module
//! `#[cfg(test)]` unit tests.

use semgraph_core::config::SimilarityConfig;
use semgraph_core::model::{ByteRange, Chunk, Function, FunctionEmbedding, LineCol, SimilarityMethod};
use semgraph_core::vector::{random_unit_vector, seeded_random};
use semgraph_core::{ChunkId, FnId};
use semgraph_similarity::{aggregate_corpus, bundle_similarity, generate_candidates};
use std::collections::HashMap;

fn mk_function_embedding(id: &str, vector: Vec<f32>) -> (FunctionEmbedding, HashMap<ChunkId, Vec<f32>>) {
    let fn_id = FnId::from(id);
    let function = Function {
        fn_id: fn_id.clone(),
        name: id.to_string(),
        file_path: format!("{id}.rs"),
        lang: "rust".into(),
        byte_range: ByteRange { start: 0, end: 10 },
        start_line: 1,
        end_line: 2,
        start_col: 0,
        end_col: 1,
        source: None,
        metrics: None,
    };
    let chunk_id = ChunkId::new(&fn_id, 0);
    let chunk = Chunk {
        chunk_id: chunk_id.clone(),
        fn_id: fn_id.clone(),
        index: 0,
        byte_range: ByteRange { start: 0, end: 10 },
        start: LineCol { line: 1, column: 0 },
        end: LineCol { line: 2, column: 1 },
        token_count: 50,
        text: String::new(),
    };
    let mut vectors = HashMap::new();
    vectors.insert(chunk_id, vector);
    (FunctionEmbedding::new(function, vec![chunk]), vectors)
}

/// S1 — three functions where `cos(A,B) ~= 0.96`, `cos(A,C) = cos(B,C) = 0`,
/// dimension 4, threshold 0.6, topK 2, maxNeighbors 4. Exactly one edge
/// `{A,B}` with similarity > 0.7 should be emitted.
#[test]
fn s1_three_function_triangle() {
    // A and B are near-parallel in the first two dimensions; C is
    // orthogonal to both (lives entirely in dimensions 3/4).
    let (fe_a, va) = mk_function_embedding("fnA", vec![1.0, 0.0, 0.0, 0.0]);
    let (fe_b, vb) = mk_function_embedding("fnB", vec![0.96, 0.28, 0.0, 0.0]);
    let (fe_c, vc) = mk_function_embedding("fnC", vec![0.0, 0.0, 1.0, 0.0]);

    let mut chunk_vectors = HashMap::new();
    chunk_vectors.extend(va);
    chunk_vectors.extend(vb);
    chunk_vectors.extend(vc);

    let functions = aggregate_corpus(vec![fe_a, fe_b, fe_c], &chunk_vectors, 4);
    assert_eq!(functions.len(), 3);

    let cfg = SimilarityConfig {
        max_neighbors: 4,
        candidate_limit: 20,
        bundle_top_k: 2,
        similarity_threshold: 0.6,
        ..SimilarityConfig::default()
    };

    let reps: Vec<Vec<f32>> = functions.iter().map(|fe| fe.representative.clone().unwrap()).collect();
    let candidates = generate_candidates(&reps, &cfg);

    let mut edges = Vec::new();
    for (i, list) in candidates.iter().enumerate() {
        for &(j, _) in list {
            if j <= i {
                continue;
            }
            let a_chunks: Vec<(ChunkId, &[f32])> = functions[i]
                .chunks
                .iter()
                .map(|c| (c.chunk_id.clone(), chunk_vectors[&c.chunk_id].as_slice()))
                .collect();
            let b_chunks: Vec<(ChunkId, &[f32])> = functions[j]
                .chunks
                .iter()
                .map(|c| (c.chunk_id.clone(), chunk_vectors[&c.chunk_id].as_slice()))
                .collect();
            let (bundle, _) = bundle_similarity(&a_chunks, &b_chunks, cfg.bundle_top_k);
            if bundle >= cfg.similarity_threshold {
                edges.push((functions[i].fn_id.clone(), functions[j].fn_id.clone(), bundle));
            }
        }
    }

    assert_eq!(edges.len(), 1, "expected exactly one edge above threshold, got {edges:?}");
    let (a, b, sim) = &edges[0];
    let mut pair = [a.as_str().to_string(), b.as_str().to_string()];
    pair.sort();
    assert_eq!(pair, ["fnA".to_string(), "fnB".to_string()]);
    assert!(*sim > 0.7, "similarity {sim} should exceed 0.7");
}

/// S4 — on a corpus at least 200 functions wide, the approximate path with
/// default band/projection settings should recover most of the exact
/// baseline's edges: recall and precision both at least 0.80.
#[test]
fn s4_approximate_recall_and_precision_are_high() {
    let n = 250;
    let dim = 16;
    let mut rng = seeded_random(2024);

    // Build a handful of tight clusters so there is real similarity
    // structure to recover, plus scattered singletons.
    let mut reps = Vec::with_capacity(n);
    let cluster_count = 10;
    let mut cluster_centers = Vec::with_capacity(cluster_count);
    for _ in 0..cluster_count {
        cluster_centers.push(random_unit_vector(dim, &mut rng));
    }
    for i in 0..n {
        let center = &cluster_centers[i % cluster_count];
        let mut v: Vec<f32> = center
            .iter()
            .map(|x| x + (rng.next_f32() - 0.5) * 0.05)
            .collect();
        semgraph_core::vector::normalize(&mut v);
        reps.push(v);
    }

    let mut exact_cfg = SimilarityConfig {
        similarity_threshold: 0.5,
        ..SimilarityConfig::default()
    };
    exact_cfg.force_approximate = false;
    exact_cfg.approximate_threshold = 0;

    let mut approx_cfg = exact_cfg;
    approx_cfg.force_approximate = true;

    let exact_candidates = semgraph_similarity::exact_candidates(&reps, exact_cfg.candidate_limit);
    let approx_candidates = semgraph_similarity::approximate_candidates(&reps, &approx_cfg);

    let edge_key = |i: usize, j: usize| if i < j { (i, j) } else { (j, i) };
    let exact_edges: std::collections::HashSet<(usize, usize)> = exact_candidates
        .iter()
        .enumerate()
        .flat_map(|(i, list)| list.iter().map(move |&(j, _)| edge_key(i, j)))
        .collect();
    let approx_edges: std::collections::HashSet<(usize, usize)> = approx_candidates
        .iter()
        .enumerate()
        .flat_map(|(i, list)| list.iter().map(move |&(j, _)| edge_key(i, j)))
        .collect();

    let overlap = exact_edges.intersection(&approx_edges).count();
    let recall = overlap as f32 / exact_edges.len() as f32;
    let precision = overlap as f32 / approx_edges.len() as f32;

    assert!(recall >= 0.80, "recall {recall} below target");
    assert!(precision >= 0.80, "precision {precision} below target");
}

#[test]
fn similarity_method_default_variant_round_trips() {
    // Sanity check that the method tag threaded through score_pair survives
    // serialization (used by persistence and the CLI's JSON output).
    let json = serde_json::to_string(&SimilarityMethod::Approximate).unwrap();
    assert_eq!(json, "\"approximate\"");
}
