//! Benchmark harness: exact baseline vs one or more approximate variants,
//! scored by canonical-key set overlap.

use crate::bundle::score_pair;
use crate::candidates::generate_candidates;
use crate::graph::cap_neighbors;
use semgraph_core::config::SimilarityConfig;
use semgraph_core::model::{FunctionEmbedding, SimilarityEdge, SimilarityMethod};
use semgraph_core::ChunkId;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// One approximate configuration to benchmark against the exact baseline.
#[derive(Debug, Clone)]
pub struct BenchmarkVariant {
    pub label: String,
    pub config: SimilarityConfig,
}

/// Precision/recall/F1/Jaccard/speedup for one run against the exact
/// baseline, plus the raw edges.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub label: String,
    pub elapsed_secs: f64,
    pub edges: Vec<SimilarityEdge>,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub jaccard: f32,
    pub speedup: f32,
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub exact: VariantReport,
    pub variants: Vec<VariantReport>,
}

/// Runs the full candidate -> bundle -> cap pipeline once, returning the
/// capped edge set and the wall-clock time for the whole pipeline (the
/// measurement unit compares across variants).
fn run_pipeline(
    functions: &[FunctionEmbedding],
    chunk_vectors: &HashMap<ChunkId, Vec<f32>>,
    cfg: &SimilarityConfig,
    method: SimilarityMethod,
) -> (Vec<SimilarityEdge>, f64) {
    let started = Instant::now();

    let reps: Vec<Vec<f32>> = functions
        .iter()
        .map(|fe| fe.representative.clone().unwrap_or_default())
        .collect();
    let candidates = generate_candidates(&reps, cfg);

    let mut by_key: HashMap<String, SimilarityEdge> = HashMap::new();
    for (i, list) in candidates.iter().enumerate() {
        for &(j, _score) in list {
            if j <= i {
                continue;
            }
            let a_chunks: Vec<(ChunkId, &[f32])> = functions[i]
                .chunks
                .iter()
                .filter_map(|c| chunk_vectors.get(&c.chunk_id).map(|v| (c.chunk_id.clone(), v.as_slice())))
                .collect();
            let b_chunks: Vec<(ChunkId, &[f32])> = functions[j]
                .chunks
                .iter()
                .filter_map(|c| chunk_vectors.get(&c.chunk_id).map(|v| (c.chunk_id.clone(), v.as_slice())))
                .collect();
            if let Some(edge) = score_pair(
                &functions[i].fn_id,
                &a_chunks,
                &reps[i],
                &functions[j].fn_id,
                &b_chunks,
                &reps[j],
                cfg,
                method,
            ) {
                by_key.entry(edge.canonical_key()).or_insert(edge);
            }
        }
    }
    let edges: Vec<SimilarityEdge> = by_key.into_values().collect();
    let capped = cap_neighbors(&edges, cfg.max_neighbors);

    (capped, started.elapsed().as_secs_f64())
}

fn canonical_keys(edges: &[SimilarityEdge]) -> HashSet<String> {
    edges.iter().map(|e| e.canonical_key()).collect()
}

/// Runs the exact baseline once, then every variant `iterations` times
/// (averaging elapsed time to dampen timer noise), and reports
/// precision/recall/F1/Jaccard/speedup of each variant against the exact
/// edge set.
pub fn run_benchmark(
    functions: &[FunctionEmbedding],
    chunk_vectors: &HashMap<ChunkId, Vec<f32>>,
    base_cfg: &SimilarityConfig,
    variants: &[BenchmarkVariant],
    iterations: usize,
) -> BenchmarkReport {
    let mut exact_cfg = *base_cfg;
    exact_cfg.force_approximate = false;
    exact_cfg.approximate_threshold = 0; // never auto-enable: exact baseline must be exact.
    let (exact_edges, exact_elapsed) =
        run_pipeline(functions, chunk_vectors, &exact_cfg, SimilarityMethod::Exact);
    let exact_keys = canonical_keys(&exact_edges);

    let exact_report = VariantReport {
        label: "exact".to_string(),
        elapsed_secs: exact_elapsed,
        edges: exact_edges,
        precision: 1.0,
        recall: 1.0,
        f1: 1.0,
        jaccard: 1.0,
        speedup: 1.0,
    };

    let iterations = iterations.max(1);
    let mut variant_reports = Vec::with_capacity(variants.len());
    for variant in variants {
        let mut total_elapsed = 0.0f64;
        let mut edges = Vec::new();
        for _ in 0..iterations {
            let (run_edges, elapsed) = run_pipeline(
                functions,
                chunk_vectors,
                &variant.config,
                SimilarityMethod::Approximate,
            );
            total_elapsed += elapsed;
            edges = run_edges;
        }
        let avg_elapsed = total_elapsed / iterations as f64;
        let approx_keys = canonical_keys(&edges);

        let overlap = exact_keys.intersection(&approx_keys).count();
        let union = exact_keys.union(&approx_keys).count();
        let recall = if exact_keys.is_empty() {
            1.0
        } else {
            overlap as f32 / exact_keys.len() as f32
        };
        let precision = if approx_keys.is_empty() {
            if exact_keys.is_empty() {
                1.0
            } else {
                0.0
            }
        } else {
            overlap as f32 / approx_keys.len() as f32
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        let jaccard = if union == 0 { 1.0 } else { overlap as f32 / union as f32 };
        let speedup = if avg_elapsed > 0.0 {
            (exact_elapsed / avg_elapsed) as f32
        } else {
            f32::INFINITY
        };

        variant_reports.push(VariantReport {
            label: variant.label.clone(),
            elapsed_secs: avg_elapsed,
            edges,
            precision,
            recall,
            f1,
            jaccard,
            speedup,
        });
    }

    BenchmarkReport {
        exact: exact_report,
        variants: variant_reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraph_core::model::{ByteRange, Function};
    use semgraph_core::vector::{random_unit_vector, seeded_random};
    use semgraph_core::FnId;

    fn make_corpus(n: usize, dim: usize) -> (Vec<FunctionEmbedding>, HashMap<ChunkId, Vec<f32>>) {
        let mut rng = seeded_random(42);
        let mut fns = Vec::new();
        let mut vectors = HashMap::new();
        for i in 0..n {
            let fn_id = FnId::from(format!("f{i}"));
            let function = Function {
                fn_id: fn_id.clone(),
                name: format!("f{i}"),
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
            let chunk_id = ChunkId::new(&fn_id, 0);
            let vec = random_unit_vector(dim, &mut rng);
            vectors.insert(chunk_id.clone(), vec.clone());
            let chunk = semgraph_core::model::Chunk {
                chunk_id,
                fn_id: fn_id.clone(),
                index: 0,
                byte_range: ByteRange { start: 0, end: 10 },
                start: semgraph_core::model::LineCol { line: 1, column: 0 },
                end: semgraph_core::model::LineCol { line: 2, column: 1 },
                token_count: 50,
                text: String::new(),
            };
            let mut fe = FunctionEmbedding::new(function, vec![chunk]);
            fe.representative = Some(vec);
            fns.push(fe);
        }
        (fns, vectors)
    }

    #[test]
    fn exact_self_comparison_is_perfect() {
        let (fns, vectors) = make_corpus(20, 8);
        let cfg = SimilarityConfig {
            similarity_threshold: -1.0, // accept everything for this determinism check
            ..SimilarityConfig::default()
        };
        let variant = BenchmarkVariant {
            label: "approx".to_string(),
            config: SimilarityConfig {
                force_approximate: true,
                similarity_threshold: -1.0,
                ..cfg
            },
        };
        let report = run_benchmark(&fns, &vectors, &cfg, &[variant], 2);
        assert_eq!(report.exact.precision, 1.0);
        assert_eq!(report.exact.recall, 1.0);
    }

    #[test]
    fn empty_corpus_yields_trivial_report() {
        let fns: Vec<FunctionEmbedding> = Vec::new();
        let vectors = HashMap::new();
        let cfg = SimilarityConfig::default();
        let report = run_benchmark(&fns, &vectors, &cfg, &[], 1);
        assert!(report.exact.edges.is_empty());
    }
}
