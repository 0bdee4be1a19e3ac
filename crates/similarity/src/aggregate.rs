//! Chunk-to-function aggregation.

use semgraph_core::model::FunctionEmbedding;
use semgraph_core::vector::{normalize, norm_sq};
use semgraph_core::ChunkId;
use std::collections::HashMap;

/// Sums every chunk vector of the correct dimension, divides by the count,
/// and L2-normalizes. Returns `None` if no chunk has a vector of the
/// expected dimension.
pub fn aggregate_representative(
    chunk_ids: &[ChunkId],
    vectors: &HashMap<ChunkId, Vec<f32>>,
    dim: usize,
) -> Option<Vec<f32>> {
    let mut sum = vec![0.0f32; dim];
    let mut count = 0usize;
    for chunk_id in chunk_ids {
        if let Some(v) = vectors.get(chunk_id) {
            if v.len() == dim {
                for (s, x) in sum.iter_mut().zip(v.iter()) {
                    *s += x;
                }
                count += 1;
            }
        }
    }
    if count == 0 {
        return None;
    }
    for s in sum.iter_mut() {
        *s /= count as f32;
    }
    normalize(&mut sum);
    if norm_sq(&sum) == 0.0 {
        // Aggregation produced an exact-zero mean (perfectly antipodal
        // chunk vectors); normalize() is a no-op on zero vectors, so this
        // function is genuinely representative-less.
        return None;
    }
    Some(sum)
}

/// Aggregates every function in `functions`, setting `representative` on
/// each and dropping those with no valid chunk vectors.
pub fn aggregate_corpus(
    mut functions: Vec<FunctionEmbedding>,
    vectors: &HashMap<ChunkId, Vec<f32>>,
    dim: usize,
) -> Vec<FunctionEmbedding> {
    functions.retain_mut(|fe| {
        let chunk_ids: Vec<ChunkId> = fe.chunks.iter().map(|c| c.chunk_id.clone()).collect();
        match aggregate_representative(&chunk_ids, vectors, dim) {
            Some(rep) => {
                fe.representative = Some(rep);
                true
            }
            None => {
                tracing::warn!(fn_id = %fe.fn_id, "dropping function with no valid chunk embeddings");
                false
            }
        }
    });
    functions
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraph_core::vector::norm_sq;

    #[test]
    fn no_chunks_returns_none() {
        assert_eq!(aggregate_representative(&[], &HashMap::new(), 4), None);
    }

    #[test]
    fn mean_of_chunk_vectors_is_unit_norm() {
        let c1 = ChunkId::new(&semgraph_core::FnId::from("f"), 0);
        let c2 = ChunkId::new(&semgraph_core::FnId::from("f"), 1);
        let mut vectors = HashMap::new();
        vectors.insert(c1.clone(), vec![1.0, 0.0, 0.0, 0.0]);
        vectors.insert(c2.clone(), vec![0.0, 1.0, 0.0, 0.0]);
        let rep = aggregate_representative(&[c1, c2], &vectors, 4).unwrap();
        assert!((norm_sq(&rep) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn wrong_dimension_chunks_are_skipped() {
        let c1 = ChunkId::new(&semgraph_core::FnId::from("f"), 0);
        let c2 = ChunkId::new(&semgraph_core::FnId::from("f"), 1);
        let mut vectors = HashMap::new();
        vectors.insert(c1.clone(), vec![1.0, 0.0, 0.0, 0.0]);
        vectors.insert(c2.clone(), vec![1.0, 2.0]); // wrong dim, skipped
        let rep = aggregate_representative(&[c1, c2], &vectors, 4).unwrap();
        assert!((rep[0] - 1.0).abs() < 1e-6);
    }
}
