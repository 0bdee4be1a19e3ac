use clap::Parser;
use semgraph_cli::init_tracing;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Validates one or more graph payloads (`{functions, callEdges,
/// similarityEdges}`, the shape produced once the validator's merger has
/// combined the parser and embeddings payloads), additionally
/// checking similarity edges.
#[derive(Parser, Debug)]
#[command(name = "validate-network-analysis", version, about)]
struct Args {
    /// A single payload file.
    payload: Option<PathBuf>,

    /// Validate every `*.json` file in a directory instead of a single file.
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn validate_one(path: &Path) -> bool {
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            println!("❌ {}: failed to read: {e}", path.display());
            return false;
        }
    };
    let parsed: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            println!("❌ {}: not valid JSON: {e}", path.display());
            return false;
        }
    };

    let report = semgraph_validate::validate_and_merge(&parsed, Some(&parsed), false);
    if report.is_valid() {
        println!(
            "✅ {} ({} functions, {} similarity edges)",
            path.display(),
            report.merged.functions.len(),
            report.merged.similarity_edges.len()
        );
        true
    } else {
        println!("❌ {}: {} issue(s)", path.display(), report.issues.len());
        for issue in &report.issues {
            println!("  - {}: {}", issue.path, issue.message);
        }
        false
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let targets: Vec<PathBuf> = if let Some(dir) = &args.dir {
        info!(dir = %dir.display(), "validating every JSON payload in directory");
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("❌ failed to read directory {}: {e}", dir.display());
                std::process::exit(1);
            }
        };
        entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect()
    } else if let Some(payload) = &args.payload {
        vec![payload.clone()]
    } else {
        eprintln!("❌ provide a payload path or --dir <dir>");
        std::process::exit(1);
    };

    if targets.is_empty() {
        eprintln!("❌ no JSON payloads found");
        std::process::exit(1);
    }

    let mut all_valid = true;
    for target in &targets {
        if !validate_one(target) {
            all_valid = false;
        }
    }

    if !all_valid {
        error!("one or more payloads failed validation");
    }
    std::process::exit(if all_valid { 0 } else { 1 });
}
