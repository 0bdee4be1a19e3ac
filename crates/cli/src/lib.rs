#![doc = r#"
semgraph-cli — shared helpers for the workspace's CLI binaries
(`benchmark-similarity`, `validate-parser-output`, `validate-network-analysis`).

Each binary follows the same shape: install a `tracing-subscriber` filter,
parse `clap`-derived args, read JSON input (from a file or stdin via `-`),
print a report to stdout, and exit 1 on failure.
"#]

use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing-subscriber::fmt` layer honoring `RUST_LOG`, default
/// `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Reads JSON from `path`, or from stdin when `path` is `-` or absent.
pub fn read_json_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
