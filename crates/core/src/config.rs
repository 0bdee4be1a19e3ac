//! Configuration defaults, following the small `*Config`
//! struct-with-`Default` pattern used throughout this workspace's sibling
//! crates.

use serde::{Deserialize, Serialize};

/// Chunker bounds. `min_tokens` and `max_tokens` are clamped to
/// the hard floors (40/20) and to `min_tokens <= max_tokens` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    pub max_tokens: usize,
    pub min_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 180,
            min_tokens: 60,
        }
    }
}

impl ChunkerConfig {
    pub const HARD_FLOOR_MAX: usize = 40;
    pub const HARD_FLOOR_MIN: usize = 20;

    pub fn new(max_tokens: usize, min_tokens: usize) -> Self {
        let max_tokens = max_tokens.max(Self::HARD_FLOOR_MAX);
        let min_tokens = min_tokens.max(Self::HARD_FLOOR_MIN).min(max_tokens);
        Self {
            max_tokens,
            min_tokens,
        }
    }
}

/// Random-projection banded LSH configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproximateConfig {
    pub projection_count: usize,
    pub band_size: usize,
    pub oversample_factor: usize,
    pub seed: u32,
}

impl Default for ApproximateConfig {
    fn default() -> Self {
        Self {
            projection_count: 12,
            band_size: 24,
            oversample_factor: 2,
            seed: 1337,
        }
    }
}

impl ApproximateConfig {
    /// Clamps ranges to the table in `projection_count in [1,64]`,
    /// `band_size in [1, n-1]`, `oversample_factor >= 1`.
    pub fn clamped(mut self, n: usize) -> Self {
        self.projection_count = self.projection_count.clamp(1, 64);
        let max_band = n.saturating_sub(1).max(1);
        self.band_size = self.band_size.clamp(1, max_band);
        self.oversample_factor = self.oversample_factor.max(1);
        self
    }
}

/// Candidate generation, bundle scoring, and graph assembly knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    pub max_neighbors: usize,
    pub candidate_limit: usize,
    pub bundle_top_k: usize,
    pub similarity_threshold: f32,
    /// Function count above which the approximate path auto-enables.
    /// `0` means "never auto-enable".
    pub approximate_threshold: usize,
    pub approximate: ApproximateConfig,
    /// Force the approximate path regardless of corpus size.
    pub force_approximate: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_neighbors: 8,
            candidate_limit: 20,
            bundle_top_k: 3,
            similarity_threshold: 0.65,
            approximate_threshold: 600,
            approximate: ApproximateConfig::default(),
            force_approximate: false,
        }
    }
}

impl SimilarityConfig {
    /// Dispatch rule from approximate iff forced, or `n >=
    /// approximate_threshold` with the threshold nonzero.
    pub fn use_approximate(&self, n: usize) -> bool {
        self.force_approximate || (self.approximate_threshold != 0 && n >= self.approximate_threshold)
    }
}
