#![doc = r#"
semgraph-validate — Structural and semantic validation of the parser
payload and the embeddings payload, and their merge into one record.

Validation never throws: every problem is accumulated as a `{path,
message}` issue and returned alongside whatever could still be built from
the rest of the payload. Callers decide what to do with a non-empty issue
list; a CLI wrapper typically treats it as failure (see `semgraph-cli`).
"#]

use semgraph_core::model::{
    ByteRange, CallEdge, CallSite, Function, ResolutionStatus, SimilarityEdge, SimilarityMethod,
};
use semgraph_core::FnId;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One validation problem, reported by JSON-pointer-flavored `path` and a
/// human-readable `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The normalized record produced by merging a parser payload and an
/// embeddings payload.
#[derive(Debug, Clone, Default)]
pub struct MergedPayload {
    pub functions: Vec<Function>,
    pub call_edges: Vec<CallEdge>,
    pub similarity_edges: Vec<SimilarityEdge>,
    pub extras: Map<String, Value>,
}

/// Result of [`validate_and_merge`]: the best-effort merged payload plus
/// every issue found along the way. An empty `issues` means the input was
/// fully valid.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub merged: MergedPayload,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

const PARSER_TOP_LEVEL_KEYS: &[&str] = &["functions", "callEdges", "stats", "symbolTables"];
const EMBEDDINGS_TOP_LEVEL_KEYS: &[&str] = &["similarityEdges", "metadata", "stats"];

/// Validates and merges a parser payload (`{functions, callEdges, stats?,
/// symbolTables?}`) and an optional embeddings payload (`{similarityEdges,
/// metadata?, stats?}`) `strict` additionally rejects
/// unknown top-level keys on either payload.
pub fn validate_and_merge(
    parser: &Value,
    embeddings: Option<&Value>,
    strict: bool,
) -> ValidationReport {
    let mut issues = Vec::new();

    check_unknown_keys(parser, "$", PARSER_TOP_LEVEL_KEYS, strict, &mut issues);
    if let Some(embeddings) = embeddings {
        check_unknown_keys(embeddings, "$", EMBEDDINGS_TOP_LEVEL_KEYS, strict, &mut issues);
    }

    let (functions, known_ids) = parse_functions(parser, &mut issues);
    let call_edges = parse_call_edges(parser, &known_ids, &mut issues);
    let similarity_edges = embeddings
        .map(|e| parse_similarity_edges(e, &known_ids, &mut issues))
        .unwrap_or_default();

    let mut extras = Map::new();
    if let Some(stats) = parser.get("stats") {
        extras.insert("parserStats".to_string(), stats.clone());
    }
    if let Some(tables) = parser.get("symbolTables") {
        extras.insert("symbolTables".to_string(), tables.clone());
    }
    if let Some(embeddings) = embeddings {
        if let Some(metadata) = embeddings.get("metadata") {
            extras.insert("embeddingsMetadata".to_string(), metadata.clone());
        }
        if let Some(stats) = embeddings.get("stats") {
            extras.insert("embeddingsStats".to_string(), stats.clone());
        }
    }

    ValidationReport {
        merged: MergedPayload {
            functions,
            call_edges,
            similarity_edges,
            extras,
        },
        issues,
    }
}

fn check_unknown_keys(
    value: &Value,
    path: &str,
    known: &[&str],
    strict: bool,
    issues: &mut Vec<ValidationIssue>,
) {
    if !strict {
        return;
    }
    let Some(obj) = value.as_object() else {
        issues.push(ValidationIssue::new(path, "expected a JSON object"));
        return;
    };
    for key in obj.keys() {
        if !known.contains(&key.as_str()) {
            issues.push(ValidationIssue::new(
                format!("{path}.{key}"),
                "unknown top-level key",
            ));
        }
    }
}

fn get_str(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn get_usize(obj: &Value, key: &str) -> Option<usize> {
    obj.get(key).and_then(Value::as_u64).map(|v| v as usize)
}

fn parse_functions(parser: &Value, issues: &mut Vec<ValidationIssue>) -> (Vec<Function>, HashSet<String>) {
    let mut functions = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    let Some(raw_functions) = parser.get("functions").and_then(Value::as_array) else {
        issues.push(ValidationIssue::new("$.functions", "required array is missing"));
        return (functions, seen_ids);
    };

    for (i, entry) in raw_functions.iter().enumerate() {
        let path = format!("$.functions[{i}]");
        let id = get_str(entry, "id");
        let name = get_str(entry, "name");
        let file_path = get_str(entry, "filePath");
        let lang = get_str(entry, "lang");
        let start_line = get_usize(entry, "startLine");
        let end_line = get_usize(entry, "endLine");

        let mut missing = Vec::new();
        if id.is_none() {
            missing.push("id");
        }
        if name.is_none() {
            missing.push("name");
        }
        if file_path.is_none() {
            missing.push("filePath");
        }
        if lang.is_none() {
            missing.push("lang");
        }
        if start_line.is_none() {
            missing.push("startLine");
        }
        if end_line.is_none() {
            missing.push("endLine");
        }
        if !missing.is_empty() {
            issues.push(ValidationIssue::new(
                path,
                format!("missing or malformed required field(s): {}", missing.join(", ")),
            ));
            continue;
        }
        let id = id.unwrap();
        if !seen_ids.insert(id.clone()) {
            issues.push(ValidationIssue::new(format!("{path}.id"), "duplicate fn_id"));
            continue;
        }

        let start_col = get_usize(entry, "startCol").unwrap_or(0);
        let end_col = get_usize(entry, "endCol").unwrap_or(0);
        let byte_start = get_usize(entry, "byteStart").unwrap_or(0);
        let byte_end = get_usize(entry, "byteEnd").unwrap_or(byte_start);
        let source = get_str(entry, "source");
        let metrics = entry.get("metrics").and_then(Value::as_object).cloned();

        functions.push(Function {
            fn_id: FnId::from(id),
            name: name.unwrap(),
            file_path: file_path.unwrap(),
            lang: lang.unwrap(),
            byte_range: ByteRange {
                start: byte_start,
                end: byte_end,
            },
            start_line: start_line.unwrap(),
            end_line: end_line.unwrap(),
            start_col,
            end_col,
            source,
            metrics,
        });
    }

    (functions, seen_ids)
}

fn parse_resolution_status(entry: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<ResolutionStatus> {
    let status = entry
        .get("resolution")
        .and_then(|r| r.get("status"))
        .and_then(Value::as_str)
        .unwrap_or("resolved");
    match status {
        "resolved" => Some(ResolutionStatus::Resolved),
        "ambiguous" => Some(ResolutionStatus::Ambiguous),
        "unresolved" => Some(ResolutionStatus::Unresolved),
        other => {
            issues.push(ValidationIssue::new(
                format!("{path}.resolution.status"),
                format!("unknown resolution status '{other}'"),
            ));
            None
        }
    }
}

fn parse_call_edges(
    parser: &Value,
    known_ids: &HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<CallEdge> {
    let mut edges = Vec::new();
    let Some(raw_edges) = parser.get("callEdges").and_then(Value::as_array) else {
        return edges;
    };

    for (i, entry) in raw_edges.iter().enumerate() {
        let path = format!("$.callEdges[{i}]");
        let source = get_str(entry, "source");
        let target = get_str(entry, "target");
        let (Some(source), Some(target)) = (source, target) else {
            issues.push(ValidationIssue::new(&path, "source and target are required strings"));
            continue;
        };

        let Some(resolution_status) = parse_resolution_status(entry, &path, issues) else {
            continue;
        };

        if !known_ids.contains(&source) {
            issues.push(ValidationIssue::new(format!("{path}.source"), "unknown fn_id"));
            continue;
        }
        if !known_ids.contains(&target) && resolution_status != ResolutionStatus::Unresolved {
            issues.push(ValidationIssue::new(
                format!("{path}.target"),
                "unknown fn_id for a non-unresolved call edge",
            ));
            continue;
        }

        let weight = entry.get("weight").and_then(Value::as_f64).unwrap_or(1.0) as f32;
        let is_dynamic = entry.get("isDynamic").and_then(Value::as_bool).unwrap_or(false);
        let call_sites = entry
            .get("callSites")
            .and_then(Value::as_array)
            .map(|sites| {
                sites
                    .iter()
                    .filter_map(|site| {
                        Some(CallSite {
                            file_path: get_str(site, "filePath")?,
                            line: get_usize(site, "line")?,
                            column: get_usize(site, "column")?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        edges.push(CallEdge {
            source: FnId::from(source),
            target: FnId::from(target),
            weight,
            is_dynamic,
            resolution_status,
            call_sites,
        });
    }

    edges
}

fn parse_similarity_edges(
    embeddings: &Value,
    known_ids: &HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<SimilarityEdge> {
    let mut edges = Vec::new();
    let Some(raw_edges) = embeddings.get("similarityEdges").and_then(Value::as_array) else {
        issues.push(ValidationIssue::new("$.similarityEdges", "required array is missing"));
        return edges;
    };

    for (i, entry) in raw_edges.iter().enumerate() {
        let path = format!("$.similarityEdges[{i}]");
        let source = get_str(entry, "source");
        let target = get_str(entry, "target");
        let similarity = entry.get("similarity").and_then(Value::as_f64).map(|v| v as f32);

        let (Some(source), Some(target), Some(similarity)) = (source, target, similarity) else {
            issues.push(ValidationIssue::new(
                &path,
                "source, target, and similarity are required",
            ));
            continue;
        };

        if source == target {
            issues.push(ValidationIssue::new(&path, "endpoints must be distinct fn_ids"));
            continue;
        }
        if !known_ids.contains(&source) || !known_ids.contains(&target) {
            issues.push(ValidationIssue::new(&path, "both endpoints must be existing fn_ids"));
            continue;
        }
        if !(-1.0..=1.0).contains(&similarity) {
            issues.push(ValidationIssue::new(
                format!("{path}.similarity"),
                "similarity must be within [-1, 1]",
            ));
            continue;
        }

        let method = match entry.get("method").and_then(Value::as_str) {
            Some("approximate") => SimilarityMethod::Approximate,
            _ => SimilarityMethod::Exact,
        };
        let representative_similarity = entry
            .get("representativeSimilarity")
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(similarity);

        edges.push(SimilarityEdge::new(
            FnId::from(source),
            FnId::from(target),
            similarity,
            method,
            representative_similarity,
            Vec::new(),
        ));
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_minimal_parser_payload_has_no_issues() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": []
        });
        let report = validate_and_merge(&parser, None, false);
        assert!(report.is_valid());
        assert_eq!(report.merged.functions.len(), 1);
    }

    #[test]
    fn missing_required_function_field_is_reported_and_skipped() {
        let parser = json!({
            "functions": [{"id": "a", "name": "a"}],
            "callEdges": []
        });
        let report = validate_and_merge(&parser, None, false);
        assert!(!report.is_valid());
        assert!(report.merged.functions.is_empty());
    }

    #[test]
    fn duplicate_fn_id_is_rejected() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2},
                {"id": "a", "name": "b", "filePath": "b.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": []
        });
        let report = validate_and_merge(&parser, None, false);
        assert_eq!(report.merged.functions.len(), 1);
        assert!(report.issues.iter().any(|i| i.message.contains("duplicate")));
    }

    #[test]
    fn unresolved_call_edge_with_unknown_target_validates() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": [
                {"source": "a", "target": "ghost", "resolution": {"status": "unresolved"}}
            ]
        });
        let report = validate_and_merge(&parser, None, false);
        assert!(report.is_valid());
        assert_eq!(report.merged.call_edges.len(), 1);
    }

    #[test]
    fn resolved_call_edge_with_unknown_target_fails() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": [
                {"source": "a", "target": "ghost", "resolution": {"status": "resolved"}}
            ]
        });
        let report = validate_and_merge(&parser, None, false);
        assert!(!report.is_valid());
        assert!(report.merged.call_edges.is_empty());
    }

    #[test]
    fn similarity_edge_out_of_range_is_rejected() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2},
                {"id": "b", "name": "b", "filePath": "b.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": []
        });
        let embeddings = json!({
            "similarityEdges": [{"source": "a", "target": "b", "similarity": 1.5}]
        });
        let report = validate_and_merge(&parser, Some(&embeddings), false);
        assert!(!report.is_valid());
        assert!(report.merged.similarity_edges.is_empty());
    }

    #[test]
    fn similarity_edge_endpoints_must_be_distinct() {
        let parser = json!({
            "functions": [
                {"id": "a", "name": "a", "filePath": "a.rs", "lang": "rust", "startLine": 1, "endLine": 2}
            ],
            "callEdges": []
        });
        let embeddings = json!({
            "similarityEdges": [{"source": "a", "target": "a", "similarity": 0.9}]
        });
        let report = validate_and_merge(&parser, Some(&embeddings), false);
        assert!(!report.is_valid());
    }

    #[test]
    fn strict_mode_rejects_unknown_top_level_key() {
        let parser = json!({
            "functions": [],
            "callEdges": [],
            "bogus": 1
        });
        let report = validate_and_merge(&parser, None, true);
        assert!(!report.is_valid());
        assert!(report.issues.iter().any(|i| i.path == "$.bogus"));
    }

    #[test]
    fn non_strict_mode_ignores_unknown_top_level_key() {
        let parser = json!({
            "functions": [],
            "callEdges": [],
            "bogus": 1
        });
        let report = validate_and_merge(&parser, None, false);
        assert!(report.is_valid());
    }
}
