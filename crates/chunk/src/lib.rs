#![doc = r#"
semgraph-chunk — Token-bounded overlapping chunking of function source text.

The chunker walks a function's source line by line, flushing an accumulator
into a chunk when either the token budget is exceeded or a blank line is
encountered, and merges under-sized trailing chunks into their predecessor.
It is purely synchronous (no suspension points) per the workspace's
concurrency model.
"#]

use semgraph_core::config::ChunkerConfig;
use semgraph_core::model::{ByteRange, Chunk, Function, LineCol};
use semgraph_core::{ChunkId, FnId};

/// Aggregate stats over a chunking run, reported alongside the chunks
/// themselves — useful for logging/benchmarking without a metrics
/// subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkStats {
    pub functions_chunked: usize,
    pub chunks_emitted: usize,
    pub chunks_merged: usize,
}

/// Chunk every function in `functions`, returning the concatenated chunk
/// list (preserving per-function order) and aggregate stats.
pub fn chunk_corpus(functions: &[Function], cfg: &ChunkerConfig) -> (Vec<Chunk>, ChunkStats) {
    let mut all = Vec::new();
    let mut stats = ChunkStats::default();
    for function in functions {
        let before = all.len();
        let (chunks, merged) = chunk_function_with_merge_count(function, cfg);
        stats.functions_chunked += 1;
        stats.chunks_emitted += chunks.len();
        stats.chunks_merged += merged;
        all.extend(chunks);
        tracing::trace!(
            fn_id = %function.fn_id,
            emitted = all.len() - before,
            "chunked function"
        );
    }
    (all, stats)
}

/// Chunk a single function's source. Returns an empty
/// list if the function carries no source text.
pub fn chunk_function(function: &Function, cfg: &ChunkerConfig) -> Vec<Chunk> {
    chunk_function_with_merge_count(function, cfg).0
}

fn chunk_function_with_merge_count(function: &Function, cfg: &ChunkerConfig) -> (Vec<Chunk>, usize) {
    let Some(source) = function.source.as_deref() else {
        return (Vec::new(), 0);
    };
    if source.is_empty() {
        return (Vec::new(), 0);
    }

    let base = function.byte_range.start;
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut merged_count = 0usize;
    let mut acc: Option<Accumulator> = None;
    let mut rel_offset: usize = 0;
    let mut chunk_index: usize = 0;

    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let last_line_no = function.start_line + lines.len().saturating_sub(1);
    let mut line_no = function.start_line;

    for raw_line in &lines {
        let line_len = raw_line.len();
        let line_start_rel = rel_offset;
        let line_end_rel = rel_offset + line_len;
        let line_text = raw_line.trim_end_matches('\n').trim_end_matches('\r');
        let is_blank = line_text.trim().is_empty();
        let is_first_fn_line = line_no == function.start_line;
        let is_last_fn_line = line_no == last_line_no;

        // Flush on a blank-line boundary (before this line joins any
        // accumulator); the blank line itself is then skipped below as a
        // leading blank of the next chunk.
        if acc.is_some() && is_blank {
            flush(
                &mut chunks,
                acc.take().unwrap(),
                function,
                base,
                cfg,
                &mut chunk_index,
                &mut merged_count,
            );
        }

        if acc.is_none() && is_blank {
            rel_offset = line_end_rel;
            line_no += 1;
            continue;
        }

        if acc.is_none() {
            let start_col = if is_first_fn_line {
                function.start_col
            } else {
                indent_of(line_text)
            };
            acc = Some(Accumulator {
                start_rel: line_start_rel,
                start_line: line_no,
                start_col,
                end_rel: line_end_rel,
                end_line: line_no,
                end_col: 0,
                token_count: 0,
                lines: Vec::new(),
            });
        }

        let current = acc.as_mut().expect("just ensured Some");
        current.end_rel = line_end_rel;
        current.end_line = line_no;
        current.end_col = if is_last_fn_line {
            function.end_col
        } else {
            line_text.chars().count()
        };
        current.token_count += whitespace_token_count(line_text);
        current.lines.push(line_text.to_string());

        rel_offset = line_end_rel;
        line_no += 1;

        if current.token_count >= cfg.max_tokens {
            flush(
                &mut chunks,
                acc.take().unwrap(),
                function,
                base,
                cfg,
                &mut chunk_index,
                &mut merged_count,
            );
        }
    }

    // Force-flush regardless of min_tokens.
    if let Some(remaining) = acc.take() {
        flush(
            &mut chunks,
            remaining,
            function,
            base,
            cfg,
            &mut chunk_index,
            &mut merged_count,
        );
    }

    (chunks, merged_count)
}

struct Accumulator {
    start_rel: usize,
    start_line: usize,
    start_col: usize,
    end_rel: usize,
    end_line: usize,
    end_col: usize,
    token_count: usize,
    lines: Vec<String>,
}

fn flush(
    chunks: &mut Vec<Chunk>,
    acc: Accumulator,
    function: &Function,
    base: usize,
    cfg: &ChunkerConfig,
    chunk_index: &mut usize,
    merged_count: &mut usize,
) {
    if acc.token_count < cfg.min_tokens {
        if let Some(prev) = chunks.last_mut() {
            prev.byte_range.end = base + acc.end_rel;
            prev.end.line = acc.end_line;
            prev.end.column = acc.end_col;
            prev.token_count += acc.token_count;
            if !acc.lines.is_empty() {
                prev.text.push('\n');
                prev.text.push_str(&acc.lines.join("\n"));
            }
            *merged_count += 1;
            return;
        }
    }
    emit(chunks, acc, function, base, chunk_index);
}

fn emit(chunks: &mut Vec<Chunk>, acc: Accumulator, function: &Function, base: usize, chunk_index: &mut usize) {
    let index = *chunk_index;
    *chunk_index += 1;
    let fn_id: FnId = function.fn_id.clone();
    chunks.push(Chunk {
        chunk_id: ChunkId::new(&fn_id, index),
        fn_id,
        index,
        byte_range: ByteRange {
            start: base + acc.start_rel,
            end: base + acc.end_rel,
        },
        start: LineCol {
            line: acc.start_line,
            column: acc.start_col,
        },
        end: LineCol {
            line: acc.end_line,
            column: acc.end_col,
        },
        token_count: acc.token_count,
        text: acc.lines.join("\n"),
    });
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn whitespace_token_count(line: &str) -> usize {
    line.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraph_core::model::ByteRange as BR;

    fn mk_function(source: &str, max_tokens: usize, min_tokens: usize) -> (Function, ChunkerConfig) {
        let end_line = source.lines().count().max(1);
        let last_line_len = source.lines().last().unwrap_or("").chars().count();
        let f = Function {
            fn_id: FnId::from("fnA"),
            name: "fnA".into(),
            file_path: "a.rs".into(),
            lang: "rust".into(),
            byte_range: BR {
                start: 100,
                end: 100 + source.len(),
            },
            start_line: 10,
            end_line: 10 + end_line - 1,
            start_col: 0,
            end_col: last_line_len,
            source: Some(source.to_string()),
            metrics: None,
        };
        (f, ChunkerConfig::new(max_tokens, min_tokens))
    }

    #[test]
    fn empty_source_yields_no_chunks() {
        let (mut f, cfg) = mk_function("", 180, 60);
        f.source = None;
        assert!(chunk_function(&f, &cfg).is_empty());
    }

    #[test]
    fn single_small_function_is_one_chunk() {
        let (f, cfg) = mk_function("fn foo() {\n    1 + 1\n}\n", 180, 60);
        let chunks = chunk_function(&f, &cfg);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert!(chunks[0].byte_range.start >= f.byte_range.start);
        assert!(chunks[0].byte_range.end <= f.byte_range.end);
    }

    #[test]
    fn chunks_are_ordered_and_non_overlapping() {
        let body = "let x = 1;\n".repeat(100);
        let (f, cfg) = mk_function(&body, 20, 10);
        let chunks = chunk_function(&f, &cfg);
        assert!(chunks.len() > 1);
        for w in chunks.windows(2) {
            assert!(w[0].index < w[1].index);
            assert!(w[0].byte_range.end <= w[1].byte_range.start);
        }
    }

    #[test]
    fn every_chunk_is_within_function_byte_range() {
        let body = "let x = 1;\n".repeat(50);
        let (f, cfg) = mk_function(&body, 20, 10);
        for chunk in chunk_function(&f, &cfg) {
            assert!(chunk.byte_range.start >= f.byte_range.start);
            assert!(chunk.byte_range.end <= f.byte_range.end);
        }
    }

    #[test]
    fn undersized_trailing_chunk_merges_into_previous() {
        // First chunk reaches max_tokens quickly; remaining lines are few
        // tokens and should merge rather than form a standalone chunk.
        let body = format!("{}\nlet y = 2;\n", "a b c d e\n".repeat(5));
        let (f, cfg) = mk_function(&body, 20, 15);
        let chunks = chunk_function(&f, &cfg);
        // Every chunk (besides possibly the very first, if it's the only
        // one) must satisfy the min_tokens floor.
        if chunks.len() > 1 {
            for c in &chunks[..] {
                assert!(c.token_count >= cfg.min_tokens || chunks.len() == 1);
            }
        }
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let (f, cfg) = mk_function("\n\nfn foo() { 1 }\n", 180, 20);
        let chunks = chunk_function(&f, &cfg);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("fn foo"));
    }

    #[test]
    fn chunk_id_matches_fn_id_and_index() {
        let (f, cfg) = mk_function("fn foo() { 1 }\n", 180, 20);
        let chunks = chunk_function(&f, &cfg);
        assert_eq!(chunks[0].chunk_id.as_str(), "fnA:chunk-0");
    }
}
