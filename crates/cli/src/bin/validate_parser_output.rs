use clap::Parser;
use semgraph_cli::{init_tracing, read_json_input};
use std::path::PathBuf;
use tracing::{error, info};

/// Validates a parser payload (`{functions, callEdges, stats?, symbolTables?}`)
/// against the structural/semantic rules for a parser payload.
#[derive(Parser, Debug)]
#[command(name = "validate-parser-output", version, about)]
struct Args {
    /// Reject unknown top-level keys.
    #[arg(long)]
    strict: bool,

    /// Input path, or `-`/omitted for stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let raw = match read_json_input(args.input.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ failed to read input: {e}");
            std::process::exit(1);
        }
    };

    let parsed: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("❌ input is not valid JSON: {e}");
            std::process::exit(1);
        }
    };

    info!(strict = args.strict, "validating parser payload");
    let report = semgraph_validate::validate_and_merge(&parsed, None, args.strict);

    if report.is_valid() {
        println!("✅ parser payload is valid ({} functions, {} call edges)", report.merged.functions.len(), report.merged.call_edges.len());
        std::process::exit(0);
    }

    println!("❌ {} issue(s) found:", report.issues.len());
    for issue in &report.issues {
        println!("  - {}: {}", issue.path, issue.message);
    }
    error!(count = report.issues.len(), "parser payload failed validation");
    std::process::exit(1);
}
