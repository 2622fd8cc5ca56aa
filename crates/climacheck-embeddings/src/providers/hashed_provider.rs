//! Deterministic offline embeddings.
//!
//! Terms are hashed (FNV-1a) into a fixed number of buckets with a hash-derived
//! sign, weighted by term frequency, and L2 normalized. No network, no model;
//! texts sharing vocabulary get positive cosine similarity.

use std::collections::BTreeMap;

use climacheck_core::errors::ClimacheckResult;
use climacheck_core::traits::IEmbeddingProvider;

pub struct HashedEmbeddingProvider {
    dimensions: usize,
}

impl HashedEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    fn terms(text: &str) -> BTreeMap<String, f32> {
        let mut counts = BTreeMap::new();
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
        {
            *counts.entry(term.to_lowercase()).or_insert(0.0) += 1.0;
        }
        counts
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for (term, count) in Self::terms(text) {
            let h = Self::fnv1a(&term);
            let bucket = (h % self.dimensions as u64) as usize;
            // The top bit picks the sign so colliding terms tend to cancel
            // rather than pile up.
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign * count;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

impl IEmbeddingProvider for HashedEmbeddingProvider {
    fn embed(&self, text: &str) -> ClimacheckResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed"
    }
}
