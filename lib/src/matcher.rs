//! Nearest-signature character matching with a quantized cache
//!
//! Vectors are quantized to 5 bits per region (32 buckets) and packed into a
//! 30-bit key. Every vector is resolved through its key: the linear scan runs
//! on the bucket's lower corner, so a cached answer is always the answer a
//! fresh scan would give.

use crate::shapes::{SamplingVector, ShapeLibrary};
use log::trace;
use std::collections::HashMap;

/// Buckets per region
pub const QUANT_LEVELS: u32 = 32;

/// Whether resolved keys are memoized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Enabled,
    /// Always run the full catalog scan
    Disabled,
}

/// Cache counters for one matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Combine counters from several matchers
    pub fn merge(self, other: CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            entries: self.entries + other.entries,
        }
    }

    /// Counters accumulated since an earlier snapshot of the same matcher
    pub fn since(self, earlier: CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits.saturating_sub(earlier.hits),
            misses: self.misses.saturating_sub(earlier.misses),
            entries: self.entries.saturating_sub(earlier.entries),
        }
    }
}

/// Pack a vector into its quantized cache key
///
/// Each region maps to `floor(v * 32)` clamped to [0, 31]; non-finite values
/// map to bucket 0. TL is the most significant base-32 digit.
pub fn quantize(vector: &SamplingVector) -> u32 {
    vector.iter().fold(0, |key, &v| {
        let bucket = if v.is_finite() {
            ((v * QUANT_LEVELS as f32).floor().max(0.0) as u32).min(QUANT_LEVELS - 1)
        } else {
            0
        };
        key * QUANT_LEVELS + bucket
    })
}

/// Lower corner of the bucket a key represents
pub fn dequantize(key: u32) -> SamplingVector {
    let mut vector = [0.0; 6];
    let mut rest = key;
    for slot in vector.iter_mut().rev() {
        *slot = (rest % QUANT_LEVELS) as f32 / QUANT_LEVELS as f32;
        rest /= QUANT_LEVELS;
    }
    vector
}

/// Catalog entry closest to `vector` by Euclidean distance
///
/// Scans in catalog order; on equal distance the earlier entry wins.
pub fn find_best(library: &ShapeLibrary, vector: &SamplingVector) -> char {
    let mut best = library.blank();
    let mut best_dist = f32::INFINITY;

    for shape in library.shapes() {
        let dist: f32 = shape
            .signature
            .iter()
            .zip(vector)
            .map(|(s, v)| (s - v) * (s - v))
            .sum();

        if dist < best_dist {
            best_dist = dist;
            best = shape.ch;
        }
    }

    best
}

/// Resolves sampling vectors to characters, memoizing by quantized key
#[derive(Debug, Clone)]
pub struct CharacterMatcher<'a> {
    library: &'a ShapeLibrary,
    mode: CacheMode,
    cache: HashMap<u32, char>,
    hits: u64,
    misses: u64,
}

impl<'a> CharacterMatcher<'a> {
    pub fn new(library: &'a ShapeLibrary) -> Self {
        Self::with_mode(library, CacheMode::Enabled)
    }

    pub fn with_mode(library: &'a ShapeLibrary, mode: CacheMode) -> Self {
        Self {
            library,
            mode,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// A matcher over the same library with an empty cache
    pub fn fresh(&self) -> Self {
        Self::with_mode(self.library, self.mode)
    }

    pub fn library(&self) -> &'a ShapeLibrary {
        self.library
    }

    /// Best-matching character for a sampling vector
    ///
    /// Always succeeds; the blank character is the fallback.
    pub fn match_vector(&mut self, vector: &SamplingVector) -> char {
        let key = quantize(vector);

        if self.mode == CacheMode::Enabled
            && let Some(&ch) = self.cache.get(&key)
        {
            self.hits += 1;
            return ch;
        }

        self.misses += 1;
        let ch = find_best(self.library, &dequantize(key));
        trace!("key {:#010x} -> {:?}", key, ch);

        if self.mode == CacheMode::Enabled {
            self.cache.insert(key, ch);
        }
        ch
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
