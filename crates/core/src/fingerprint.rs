//! Deterministic fingerprint over a function set.
//!
//! The fingerprint is the SHA-256 hex digest of the sorted list of per-function
//! descriptors `fn_id:|source|:lang` (where `|source|` is the byte length of
//! the function's source text, 0 if absent) joined by `|`. It is
//! order-independent and changes whenever a function's source length or
//! language changes. The empty function set fingerprints to the literal
//! `"fn:0"`.

use crate::model::Function;
use sha2::{Digest, Sha256};

/// Computes the fingerprint for a function set.
pub fn fingerprint<'a>(functions: impl IntoIterator<Item = &'a Function>) -> String {
    let mut descriptors: Vec<String> = functions
        .into_iter()
        .map(|f| {
            let source_len = f.source.as_ref().map(|s| s.len()).unwrap_or(0);
            format!("{}:{}:{}", f.fn_id.as_str(), source_len, f.lang)
        })
        .collect();

    if descriptors.is_empty() {
        return "fn:0".to_string();
    }

    descriptors.sort();
    let joined = descriptors.join("|");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
