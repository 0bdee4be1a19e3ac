#![doc = r#"
semgraph-store — Fingerprint-keyed persistence over an embedded Cozo
database.

Schema mirrors the entity model directly: `files`, `functions`, `chunks`,
`embeddings`, `sim_edges`, `kv`. Vectors are stored as raw little-endian
`float32` byte blobs rather than Cozo's native numeric-list encoding — this
crate never queries by vector inside Cozo, so a blob is the simpler, more
literal persistence of the model.
"#]

use cozo::{DataValue, Db, MemStorage, NamedRows, ScriptMutability};
use semgraph_core::model::{ByteRange, Chunk, Embedding, Function, SimilarityEdge, SimilarityMethod};
use semgraph_core::{ChunkId, FnId};
use semgraph_error::{Error, Result, StorageError};
use std::collections::{BTreeMap, HashSet};

/// The highest schema version this build understands.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schema.version";
/// KV key for the corpus fingerprint.
pub const FINGERPRINT_KEY: &str = "embeddings.fingerprint";
/// KV key for run metadata.
pub const METADATA_KEY: &str = "embeddings.metadata";

/// Run metadata persisted alongside the fingerprint.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub backend: String,
    pub model_id: String,
    pub dimension: u32,
    pub quantized: bool,
    pub updated_at: String,
}

impl Metadata {
    fn to_json(&self, chunk_count: usize, embedding_count: usize, edge_count: usize) -> String {
        serde_json::json!({
            "backend": self.backend,
            "modelId": self.model_id,
            "dimension": self.dimension,
            "quantized": self.quantized,
            "chunkCount": chunk_count,
            "embeddingCount": embedding_count,
            "edgeCount": edge_count,
            "updatedAt": self.updated_at,
        })
        .to_string()
    }
}

/// Everything a single run hands to [`Store::persist`], in the order
/// requires them to be written.
pub struct PersistWrite<'a> {
    pub functions: &'a [Function],
    pub chunks: &'a [Chunk],
    pub embeddings: &'a [Embedding],
    pub similarity_edges: &'a [SimilarityEdge],
    pub fingerprint: &'a str,
    pub metadata: &'a Metadata,
}

/// Outcome of [`Store::load`]: either a fully reusable prior run, or
/// "none" 's reload contract.
#[derive(Debug, Clone)]
pub enum ReloadOutcome {
    Hit {
        embeddings: Vec<Embedding>,
        similarity_edges: Vec<SimilarityEdge>,
    },
    Miss,
}

/// Embedded-Cozo-backed implementation of the workspace's storage
/// interface.
#[derive(Debug)]
pub struct Store {
    db: Db<MemStorage>,
}

impl Store {
    /// Opens an in-memory store, creating the schema and checking the
    /// schema-version guard.
    pub fn open_in_memory() -> Result<Self> {
        let db = Db::new(MemStorage::default())
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let store = Self { db };
        store.ensure_initialized()?;
        Ok(store)
    }

    /// Creates every relation if missing and checks the schema-version
    /// guard; idempotent ("Storage interface": `ensureInitialized()`).
    pub fn ensure_initialized(&self) -> Result<()> {
        self.create_schema()?;
        self.check_schema_version()
    }

    fn run_mutable(&self, script: &str, params: BTreeMap<String, DataValue>) -> Result<NamedRows> {
        self.db
            .run_script(script, params, ScriptMutability::Mutable)
            .map_err(|e| Error::from(StorageError::Query(e.to_string())))
    }

    fn run_immutable(&self, script: &str, params: BTreeMap<String, DataValue>) -> Result<NamedRows> {
        self.db
            .run_script(script, params, ScriptMutability::Immutable)
            .map_err(|e| Error::from(StorageError::Query(e.to_string())))
    }

    fn create_relation(&self, script: &str) -> Result<()> {
        match self.run_mutable(script, BTreeMap::new()) {
            Ok(_) => Ok(()),
            Err(Error::Storage(StorageError::Query(msg))) if msg.contains("exist") => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn create_schema(&self) -> Result<()> {
        self.create_relation(
            r#"
            :create files {
                path: String =>
                lang: String,
            }
            "#,
        )?;
        self.create_relation(
            r#"
            :create functions {
                fn_id: String =>
                file_path: String,
                name: String,
                start_line: Int,
                end_line: Int,
                start_col: Int,
                end_col: Int,
                byte_start: Int,
                byte_end: Int,
                source: String?,
                metrics_json: String?,
            }
            "#,
        )?;
        self.create_relation(
            r#"
            :create chunks {
                chunk_id: String =>
                fn_id: String,
                idx: Int,
                byte_start: Int,
                byte_end: Int,
                start_line: Int,
                start_col: Int,
                end_line: Int,
                end_col: Int,
                tok_count: Int,
                text: String,
            }
            "#,
        )?;
        self.create_relation(
            r#"
            :create embeddings {
                chunk_id: String =>
                vec: Bytes,
                dim: Int,
                backend: String,
                model: String,
            }
            "#,
        )?;
        self.create_relation(
            r#"
            :create sim_edges {
                a_fn_id: String,
                b_fn_id: String =>
                sim: Float,
                method: String,
                representative_sim: Float,
            }
            "#,
        )?;
        self.create_relation(
            r#"
            :create kv {
                key: String =>
                value: String,
            }
            "#,
        )?;
        Ok(())
    }

    fn check_schema_version(&self) -> Result<()> {
        match self.get_kv(SCHEMA_VERSION_KEY)? {
            Some(s) => {
                let found: u32 = s.parse().unwrap_or(SCHEMA_VERSION);
                if found > SCHEMA_VERSION {
                    return Err(StorageError::UnknownSchemaVersion {
                        found,
                        max: SCHEMA_VERSION,
                    }
                    .into());
                }
                Ok(())
            }
            None => self.set_kv(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string()),
        }
    }

    /// "Storage interface": `getKv(key)`.
    pub fn get_kv(&self, key: &str) -> Result<Option<String>> {
        let script = "?[value] := *kv{key: $key, value}";
        let mut params = BTreeMap::new();
        params.insert("key".to_string(), DataValue::from(key));
        let rows = self.run_immutable(script, params)?;
        Ok(rows.rows.into_iter().next().and_then(|row| {
            row.into_iter().next().and_then(|v| match v {
                DataValue::Str(s) => Some(s.to_string()),
                _ => None,
            })
        }))
    }

    /// "Storage interface": `setKv(key,value)`.
    pub fn set_kv(&self, key: &str, value: &str) -> Result<()> {
        let script = "?[key, value] <- [[$key, $value]] :put kv {key => value}";
        let mut params = BTreeMap::new();
        params.insert("key".to_string(), DataValue::from(key));
        params.insert("value".to_string(), DataValue::from(value));
        self.run_mutable(script, params)?;
        Ok(())
    }

    /// Reload contract: returns a prior run's data iff the
    /// fingerprint matches exactly, every requested chunk has a persisted
    /// vector, and the stored dimension matches. Any mismatch is "none".
    pub fn load(&self, fingerprint: &str, chunk_ids: &[ChunkId], dimension: usize) -> Result<ReloadOutcome> {
        match self.get_kv(FINGERPRINT_KEY)? {
            Some(stored) if stored == fingerprint => {}
            _ => return Ok(ReloadOutcome::Miss),
        }

        let mut embeddings = Vec::with_capacity(chunk_ids.len());
        for chunk_id in chunk_ids {
            match self.get_embedding(chunk_id)? {
                Some(embedding) if embedding.vector.len() == dimension => embeddings.push(embedding),
                _ => return Ok(ReloadOutcome::Miss),
            }
        }

        let similarity_edges = self.list_similarity_edges()?;
        Ok(ReloadOutcome::Hit {
            embeddings,
            similarity_edges,
        })
    }

    fn get_embedding(&self, chunk_id: &ChunkId) -> Result<Option<Embedding>> {
        let script = "?[vec, dim] := *embeddings{chunk_id: $chunk_id, vec, dim}";
        let mut params = BTreeMap::new();
        params.insert("chunk_id".to_string(), DataValue::from(chunk_id.as_str()));
        let rows = self.run_immutable(script, params)?;
        let Some(row) = rows.rows.into_iter().next() else {
            return Ok(None);
        };
        let mut cols = row.into_iter();
        let bytes = match cols.next() {
            Some(DataValue::Bytes(b)) => b,
            _ => return Ok(None),
        };
        let vector = bytes_to_f32(&bytes);
        Ok(Some(Embedding {
            chunk_id: chunk_id.clone(),
            vector,
        }))
    }

    fn list_similarity_edges(&self) -> Result<Vec<SimilarityEdge>> {
        let script = "?[a_fn_id, b_fn_id, sim, method, representative_sim] := *sim_edges{a_fn_id, b_fn_id, sim, method, representative_sim}";
        let rows = self.run_immutable(script, BTreeMap::new())?;
        let mut edges = Vec::with_capacity(rows.rows.len());
        for row in rows.rows {
            let mut cols = row.into_iter();
            let (Some(a), Some(b), Some(sim), Some(method), Some(rep)) =
                (cols.next(), cols.next(), cols.next(), cols.next(), cols.next())
            else {
                continue;
            };
            let (Some(a), Some(b)) = (data_value_str(&a), data_value_str(&b)) else {
                continue;
            };
            let sim = data_value_f32(&sim).unwrap_or(0.0);
            let rep = data_value_f32(&rep).unwrap_or(sim);
            let method = match data_value_str(&method).as_deref() {
                Some("approximate") => SimilarityMethod::Approximate,
                _ => SimilarityMethod::Exact,
            };
            edges.push(SimilarityEdge::new(FnId::from(a), FnId::from(b), sim, method, rep, Vec::new()));
        }
        Ok(edges)
    }

    /// "Storage interface": `batch(statements[])`. Runs every statement as a
    /// single Cozo script, chained as consecutive `{ }` blocks, so the whole
    /// batch commits as one transaction: readers see either every statement's
    /// effect or none of them, never a partial write. Each statement's params
    /// are namespaced by its position in `statements` before merging, since
    /// Cozo scripts share one flat parameter namespace.
    pub fn batch(&self, statements: Vec<(String, BTreeMap<String, DataValue>)>) -> Result<()> {
        if statements.is_empty() {
            return Ok(());
        }
        let mut script = String::new();
        let mut params = BTreeMap::new();
        for (idx, (fragment, fragment_params)) in statements.into_iter().enumerate() {
            let prefix = format!("s{idx}_");
            let mut keys: Vec<&String> = fragment_params.keys().collect();
            keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
            let mut renamed = fragment;
            for key in keys {
                renamed = renamed.replace(&format!("${key}"), &format!("${prefix}{key}"));
            }
            for (key, value) in fragment_params {
                params.insert(format!("{prefix}{key}"), value);
            }
            script.push('{');
            script.push_str(&renamed);
            script.push_str("}\n");
        }
        self.run_mutable(&script, params)?;
        Ok(())
    }

    /// Write contract: files, then functions (after deleting
    /// prior functions for affected files), then chunks, then embeddings
    /// (upsert by chunk_id), then sim_edges (upsert by canonical pair),
    /// then the fingerprint KV, then the metadata KV — all inside one
    /// [`Store::batch`] transaction.
    pub fn persist(&self, write: PersistWrite<'_>) -> Result<()> {
        let mut statements: Vec<(String, BTreeMap<String, DataValue>)> = Vec::new();

        let mut seen_files: HashSet<&str> = HashSet::new();
        for function in write.functions {
            if seen_files.insert(function.file_path.as_str()) {
                statements.push(file_statement(function));
            }
        }
        let mut seen_deletes: HashSet<&str> = HashSet::new();
        for function in write.functions {
            if seen_deletes.insert(function.file_path.as_str()) {
                statements.push(delete_functions_for_file_statement(&function.file_path));
            }
        }
        for function in write.functions {
            statements.push(function_statement(function));
        }
        for chunk in write.chunks {
            statements.push(chunk_statement(chunk));
        }
        for embedding in write.embeddings {
            statements.push(embedding_statement(embedding, write.metadata));
        }
        for edge in write.similarity_edges {
            statements.push(similarity_edge_statement(edge));
        }
        statements.push(kv_statement(FINGERPRINT_KEY, write.fingerprint));
        statements.push(kv_statement(
            METADATA_KEY,
            &write.metadata.to_json(write.chunks.len(), write.embeddings.len(), write.similarity_edges.len()),
        ));

        self.batch(statements)
    }
}

fn file_statement(function: &Function) -> (String, BTreeMap<String, DataValue>) {
    let script = "?[path, lang] <- [[$path, $lang]] :put files {path => lang}".to_string();
    let mut params = BTreeMap::new();
    params.insert("path".to_string(), DataValue::from(function.file_path.as_str()));
    params.insert("lang".to_string(), DataValue::from(function.lang.as_str()));
    (script, params)
}

fn delete_functions_for_file_statement(file_path: &str) -> (String, BTreeMap<String, DataValue>) {
    let script = r#"
        ?[fn_id] := *functions{fn_id, file_path: $file_path}
        :rm functions {fn_id}
    "#
    .to_string();
    let mut params = BTreeMap::new();
    params.insert("file_path".to_string(), DataValue::from(file_path));
    (script, params)
}

fn function_statement(function: &Function) -> (String, BTreeMap<String, DataValue>) {
    let script = r#"
        ?[fn_id, file_path, name, start_line, end_line, start_col, end_col, byte_start, byte_end, source, metrics_json] <- [[
            $fn_id, $file_path, $name, $start_line, $end_line, $start_col, $end_col, $byte_start, $byte_end, $source, $metrics_json
        ]] :put functions {
            fn_id => file_path, name, start_line, end_line, start_col, end_col, byte_start, byte_end, source, metrics_json
        }
    "#
    .to_string();
    let mut params = BTreeMap::new();
    params.insert("fn_id".to_string(), DataValue::from(function.fn_id.as_str()));
    params.insert("file_path".to_string(), DataValue::from(function.file_path.as_str()));
    params.insert("name".to_string(), DataValue::from(function.name.as_str()));
    params.insert("start_line".to_string(), DataValue::from(function.start_line as i64));
    params.insert("end_line".to_string(), DataValue::from(function.end_line as i64));
    params.insert("start_col".to_string(), DataValue::from(function.start_col as i64));
    params.insert("end_col".to_string(), DataValue::from(function.end_col as i64));
    params.insert("byte_start".to_string(), DataValue::from(function.byte_range.start as i64));
    params.insert("byte_end".to_string(), DataValue::from(function.byte_range.end as i64));
    params.insert(
        "source".to_string(),
        function.source.as_deref().map(DataValue::from).unwrap_or(DataValue::Null),
    );
    params.insert(
        "metrics_json".to_string(),
        function
            .metrics
            .as_ref()
            .map(|m| DataValue::from(serde_json::Value::Object(m.clone()).to_string()))
            .unwrap_or(DataValue::Null),
    );
    (script, params)
}

fn chunk_statement(chunk: &Chunk) -> (String, BTreeMap<String, DataValue>) {
    let script = r#"
        ?[chunk_id, fn_id, idx, byte_start, byte_end, start_line, start_col, end_line, end_col, tok_count, text] <- [[
            $chunk_id, $fn_id, $idx, $byte_start, $byte_end, $start_line, $start_col, $end_line, $end_col, $tok_count, $text
        ]] :put chunks {
            chunk_id => fn_id, idx, byte_start, byte_end, start_line, start_col, end_line, end_col, tok_count, text
        }
    "#
    .to_string();
    let mut params = BTreeMap::new();
    params.insert("chunk_id".to_string(), DataValue::from(chunk.chunk_id.as_str()));
    params.insert("fn_id".to_string(), DataValue::from(chunk.fn_id.as_str()));
    params.insert("idx".to_string(), DataValue::from(chunk.index as i64));
    params.insert("byte_start".to_string(), DataValue::from(chunk.byte_range.start as i64));
    params.insert("byte_end".to_string(), DataValue::from(chunk.byte_range.end as i64));
    params.insert("start_line".to_string(), DataValue::from(chunk.start.line as i64));
    params.insert("start_col".to_string(), DataValue::from(chunk.start.column as i64));
    params.insert("end_line".to_string(), DataValue::from(chunk.end.line as i64));
    params.insert("end_col".to_string(), DataValue::from(chunk.end.column as i64));
    params.insert("tok_count".to_string(), DataValue::from(chunk.token_count as i64));
    params.insert("text".to_string(), DataValue::from(chunk.text.as_str()));
    (script, params)
}

fn embedding_statement(embedding: &Embedding, metadata: &Metadata) -> (String, BTreeMap<String, DataValue>) {
    let script = r#"
        ?[chunk_id, vec, dim, backend, model] <- [[$chunk_id, $vec, $dim, $backend, $model]]
        :put embeddings {chunk_id => vec, dim, backend, model}
    "#
    .to_string();
    let mut params = BTreeMap::new();
    params.insert("chunk_id".to_string(), DataValue::from(embedding.chunk_id.as_str()));
    params.insert("vec".to_string(), DataValue::Bytes(f32_to_bytes(&embedding.vector)));
    params.insert("dim".to_string(), DataValue::from(embedding.vector.len() as i64));
    params.insert("backend".to_string(), DataValue::from(metadata.backend.as_str()));
    params.insert("model".to_string(), DataValue::from(metadata.model_id.as_str()));
    (script, params)
}

fn similarity_edge_statement(edge: &SimilarityEdge) -> (String, BTreeMap<String, DataValue>) {
    let script = r#"
        ?[a_fn_id, b_fn_id, sim, method, representative_sim] <- [[
            $a_fn_id, $b_fn_id, $sim, $method, $representative_sim
        ]] :put sim_edges {a_fn_id, b_fn_id => sim, method, representative_sim}
    "#
    .to_string();
    let method = match edge.method {
        SimilarityMethod::Exact => "exact",
        SimilarityMethod::Approximate => "approximate",
    };
    let mut params = BTreeMap::new();
    params.insert("a_fn_id".to_string(), DataValue::from(edge.source.as_str()));
    params.insert("b_fn_id".to_string(), DataValue::from(edge.target.as_str()));
    params.insert("sim".to_string(), DataValue::from(edge.similarity as f64));
    params.insert("method".to_string(), DataValue::from(method));
    params.insert(
        "representative_sim".to_string(),
        DataValue::from(edge.representative_similarity as f64),
    );
    (script, params)
}

fn kv_statement(key: &str, value: &str) -> (String, BTreeMap<String, DataValue>) {
    let script = "?[key, value] <- [[$key, $value]] :put kv {key => value}".to_string();
    let mut params = BTreeMap::new();
    params.insert("key".to_string(), DataValue::from(key));
    params.insert("value".to_string(), DataValue::from(value));
    (script, params)
}

fn f32_to_bytes(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for v in vector {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn bytes_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

fn data_value_str(value: &DataValue) -> Option<String> {
    match value {
        DataValue::Str(s) => Some(s.to_string()),
        _ => None,
    }
}

fn data_value_f32(value: &DataValue) -> Option<f32> {
    match value {
        DataValue::Num(n) => n.get_float().map(|f| f as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_round_trips() {
        let store = Store::open_in_memory().unwrap();
        store.set_kv("greeting", "hello").unwrap();
        assert_eq!(store.get_kv("greeting").unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn missing_kv_key_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.get_kv("nonexistent").unwrap(), None);
    }

    #[test]
    fn load_without_prior_run_is_a_miss() {
        let store = Store::open_in_memory().unwrap();
        let outcome = store.load("fp-1", &[], 4).unwrap();
        assert!(matches!(outcome, ReloadOutcome::Miss));
    }

    #[test]
    fn f32_byte_round_trip_is_exact() {
        let original = vec![0.1f32, -0.2, 0.3, 1.0];
        let bytes = f32_to_bytes(&original);
        let restored = bytes_to_f32(&bytes);
        assert_eq!(original, restored);
    }

    #[test]
    fn persist_then_load_recovers_same_fingerprint_vectors() {
        let store = Store::open_in_memory().unwrap();
        let fn_id = FnId::from("fnA");
        let function = Function {
            fn_id: fn_id.clone(),
            name: "a".into(),
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
        let chunk = Chunk {
            chunk_id: chunk_id.clone(),
            fn_id: fn_id.clone(),
            index: 0,
            byte_range: ByteRange { start: 0, end: 10 },
            start: semgraph_core::model::LineCol { line: 1, column: 0 },
            end: semgraph_core::model::LineCol { line: 2, column: 1 },
            token_count: 50,
            text: "fn a() {}".into(),
        };
        let embedding = Embedding {
            chunk_id: chunk_id.clone(),
            vector: vec![0.1, 0.2, 0.3, 0.4],
        };
        let metadata = Metadata {
            backend: "test".into(),
            model_id: "test-model".into(),
            dimension: 4,
            quantized: false,
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        store
            .persist(PersistWrite {
                functions: std::slice::from_ref(&function),
                chunks: std::slice::from_ref(&chunk),
                embeddings: std::slice::from_ref(&embedding),
                similarity_edges: &[],
                fingerprint: "fp-1",
                metadata: &metadata,
            })
            .unwrap();

        let outcome = store.load("fp-1", &[chunk_id], 4).unwrap();
        match outcome {
            ReloadOutcome::Hit { embeddings, .. } => {
                assert_eq!(embeddings.len(), 1);
                assert_eq!(embeddings[0].vector, vec![0.1, 0.2, 0.3, 0.4]);
            }
            ReloadOutcome::Miss => panic!("expected a hit"),
        }

        let mismatched = store.load("fp-2", &[], 4).unwrap();
        assert!(matches!(mismatched, ReloadOutcome::Miss));
    }

    #[test]
    fn batch_applies_every_statement_together() {
        let store = Store::open_in_memory().unwrap();
        store
            .batch(vec![kv_statement("k1", "v1"), kv_statement("k2", "v2")])
            .unwrap();
        assert_eq!(store.get_kv("k1").unwrap(), Some("v1".to_string()));
        assert_eq!(store.get_kv("k2").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn batch_of_no_statements_is_a_no_op() {
        let store = Store::open_in_memory().unwrap();
        store.batch(vec![]).unwrap();
    }

    #[test]
    fn persist_with_two_functions_in_one_file_keeps_both() {
        // Two functions sharing a file_path exercise the file-dedup and
        // delete-then-reinsert statements alongside per-function statements
        // in the same batch; params for each must stay isolated by position.
        let store = Store::open_in_memory().unwrap();
        let mk = |id: &str| {
            let fn_id = FnId::from(id);
            Function {
                fn_id: fn_id.clone(),
                name: id.to_string(),
                file_path: "shared.rs".into(),
                lang: "rust".into(),
                byte_range: ByteRange { start: 0, end: 10 },
                start_line: 1,
                end_line: 2,
                start_col: 0,
                end_col: 1,
                source: None,
                metrics: None,
            }
        };
        let functions = vec![mk("fnA"), mk("fnB")];
        let metadata = Metadata {
            backend: "test".into(),
            model_id: "test-model".into(),
            dimension: 4,
            quantized: false,
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        store
            .persist(PersistWrite {
                functions: &functions,
                chunks: &[],
                embeddings: &[],
                similarity_edges: &[],
                fingerprint: "fp-shared",
                metadata: &metadata,
            })
            .unwrap();

        let rows = store
            .run_immutable(
                "?[fn_id] := *functions{fn_id, file_path: $file_path}",
                {
                    let mut params = BTreeMap::new();
                    params.insert("file_path".to_string(), DataValue::from("shared.rs"));
                    params
                },
            )
            .unwrap();
        assert_eq!(rows.rows.len(), 2);
    }
}
