use clap::Parser;
use semgraph_cli::init_tracing;
use semgraph_core::config::SimilarityConfig;
use semgraph_core::model::{ByteRange, Chunk, Function, FunctionEmbedding, LineCol};
use semgraph_core::{ChunkId, FnId};
use semgraph_similarity::{aggregate_corpus, run_benchmark, BenchmarkVariant};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info};

/// Benchmarks the approximate candidate-generation path against the exact
/// baseline over a corpus of function embeddings.
#[derive(Parser, Debug)]
#[command(name = "benchmark-similarity", version, about)]
struct Args {
    /// Path to a JSON corpus: `{"functions":[{"fn_id","chunks":[{"chunk_id","vector"}]}]}`.
    #[arg(long)]
    input: PathBuf,

    /// Iterations per approximate variant, averaged to dampen timer noise.
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// JSON array of approximate variants to benchmark, e.g.
    /// `[{"label":"fast","projection_count":8,"band_size":16}]`. Defaults to
    /// a single variant using `SimilarityConfig::default()`'s approximate
    /// settings.
    #[arg(long)]
    approx: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InputChunk {
    chunk_id: String,
    vector: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct InputFunction {
    fn_id: String,
    chunks: Vec<InputChunk>,
}

#[derive(Debug, Deserialize)]
struct InputCorpus {
    functions: Vec<InputFunction>,
}

#[derive(Debug, Deserialize)]
struct VariantSpec {
    label: String,
    #[serde(default)]
    projection_count: Option<usize>,
    #[serde(default)]
    band_size: Option<usize>,
    #[serde(default)]
    oversample_factor: Option<usize>,
    #[serde(default)]
    seed: Option<u32>,
}

fn load_corpus(raw: &str) -> (Vec<FunctionEmbedding>, HashMap<ChunkId, Vec<f32>>) {
    let corpus: InputCorpus = serde_json::from_str(raw).unwrap_or_else(|e| {
        eprintln!("❌ invalid corpus JSON: {e}");
        std::process::exit(1);
    });

    let mut chunk_vectors = HashMap::new();
    let dim = corpus
        .functions
        .iter()
        .flat_map(|f| f.chunks.iter())
        .map(|c| c.vector.len())
        .next()
        .unwrap_or(0);

    let mut embeddings = Vec::with_capacity(corpus.functions.len());
    for (fi, f) in corpus.functions.into_iter().enumerate() {
        let fn_id = FnId::from(f.fn_id);
        let function = Function {
            fn_id: fn_id.clone(),
            name: fn_id.as_str().to_string(),
            file_path: format!("corpus:{fi}"),
            lang: "unknown".into(),
            byte_range: ByteRange { start: 0, end: 0 },
            start_line: 1,
            end_line: 1,
            start_col: 0,
            end_col: 0,
            source: None,
            metrics: None,
        };
        let mut chunks = Vec::with_capacity(f.chunks.len());
        for (ci, c) in f.chunks.into_iter().enumerate() {
            let chunk_id = ChunkId::new(&fn_id, ci);
            chunk_vectors.insert(chunk_id.clone(), c.vector);
            chunks.push(Chunk {
                chunk_id,
                fn_id: fn_id.clone(),
                index: ci,
                byte_range: ByteRange { start: 0, end: 0 },
                start: LineCol { line: 1, column: 0 },
                end: LineCol { line: 1, column: 0 },
                token_count: 0,
                text: String::new(),
            });
        }
        embeddings.push(FunctionEmbedding::new(function, chunks));
    }

    let embeddings = aggregate_corpus(embeddings, &chunk_vectors, dim);
    (embeddings, chunk_vectors)
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let raw = match std::fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ failed to read {}: {e}", args.input.display());
            std::process::exit(1);
        }
    };

    let (functions, chunk_vectors) = load_corpus(&raw);
    info!(functions = functions.len(), "loaded corpus");

    let base_cfg = SimilarityConfig::default();
    let variants: Vec<BenchmarkVariant> = match &args.approx {
        Some(json) => {
            let specs: Vec<VariantSpec> = match serde_json::from_str(json) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("❌ invalid --approx JSON: {e}");
                    std::process::exit(1);
                }
            };
            specs
                .into_iter()
                .map(|spec| {
                    let mut cfg = base_cfg;
                    cfg.force_approximate = true;
                    if let Some(v) = spec.projection_count {
                        cfg.approximate.projection_count = v;
                    }
                    if let Some(v) = spec.band_size {
                        cfg.approximate.band_size = v;
                    }
                    if let Some(v) = spec.oversample_factor {
                        cfg.approximate.oversample_factor = v;
                    }
                    if let Some(v) = spec.seed {
                        cfg.approximate.seed = v;
                    }
                    BenchmarkVariant { label: spec.label, config: cfg }
                })
                .collect()
        }
        None => {
            let mut cfg = base_cfg;
            cfg.force_approximate = true;
            vec![BenchmarkVariant {
                label: "default-approximate".to_string(),
                config: cfg,
            }]
        }
    };

    let report = run_benchmark(&functions, &chunk_vectors, &base_cfg, &variants, args.iterations.max(1));

    println!(
        "exact: {} edges, {:.4}s",
        report.exact.edges.len(),
        report.exact.elapsed_secs
    );
    println!(
        "{:<20} {:>8} {:>10} {:>10} {:>8} {:>8} {:>10}",
        "variant", "edges", "precision", "recall", "f1", "jaccard", "speedup"
    );
    for variant in &report.variants {
        println!(
            "{:<20} {:>8} {:>10.3} {:>10.3} {:>8.3} {:>8.3} {:>10.2}",
            variant.label,
            variant.edges.len(),
            variant.precision,
            variant.recall,
            variant.f1,
            variant.jaccard,
            variant.speedup
        );
    }

    let any_below_target = report
        .variants
        .iter()
        .any(|v| v.precision < 0.80 || v.recall < 0.80);
    if any_below_target {
        error!("one or more variants fell below the 0.80 precision/recall target");
        std::process::exit(1);
    }
    std::process::exit(0);
}
