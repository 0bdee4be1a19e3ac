//! Strongly-typed identifiers.
//!
//! `fn_id` and `chunk_id` travel through every component in this workspace
//! (chunking, aggregation, candidate generation, persistence) as map keys and
//! edge endpoints, so they are wrapped in cheap, hashable newtypes rather
//! than passed around as bare `String`.

use crate::ArcStr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a function, stable across runs as long as the underlying
/// source does not change.
#[repr(transparent)]
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FnId(pub ArcStr);

impl FnId {
    pub fn new(s: impl Into<ArcStr>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Debug for FnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnId({:?})", self.0.as_ref())
    }
}

impl fmt::Display for FnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FnId {
    fn from(s: &str) -> Self {
        Self(ArcStr::from(s))
    }
}

impl From<String> for FnId {
    fn from(s: String) -> Self {
        Self(ArcStr::from(s))
    }
}

/// Identity of a chunk: `{fn_id}:chunk-{index}`.
#[repr(transparent)]
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ChunkId(pub ArcStr);

impl ChunkId {
    /// Construct the canonical chunk id for a function and a zero-based
    /// chunk index.
    pub fn new(fn_id: &FnId, index: usize) -> Self {
        Self(ArcStr::from(format!("{}:chunk-{index}", fn_id.as_str())))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({:?})", self.0.as_ref())
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lexicographically sorted pair of endpoints, used to de-duplicate
/// undirected similarity edges.
pub fn canonical_edge_key(a: &FnId, b: &FnId) -> String {
    if a <= b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// Canonicalized endpoint order: `(min, max)`.
pub fn canonical_pair(a: FnId, b: FnId) -> (FnId, FnId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_id_format() {
        let fn_id = FnId::from("fnA");
        assert_eq!(ChunkId::new(&fn_id, 0).as_str(), "fnA:chunk-0");
        assert_eq!(ChunkId::new(&fn_id, 3).as_str(), "fnA:chunk-3");
    }

    #[test]
    fn canonical_edge_key_is_symmetric() {
        let a = FnId::from("a");
        let b = FnId::from("b");
        assert_eq!(canonical_edge_key(&a, &b), canonical_edge_key(&b, &a));
    }

    #[test]
    fn canonical_pair_orders_lexicographically() {
        let a = FnId::from("zzz");
        let b = FnId::from("aaa");
        let (lo, hi) = canonical_pair(a.clone(), b.clone());
        assert_eq!(lo, b);
        assert_eq!(hi, a);
    }
}
