use std::hash::{Hash, Hasher};

use anyhow::Result;
use twox_hash::XxHash64;

use purabali_core::traits::TextEncoder;

/// Deterministic embedding stand-in for tests and offline development.
///
/// Each lowercased whitespace token is bucketed by hash and the result is
/// L2-normalized, so identical texts map to identical unit vectors and
/// token overlap still moves the inner product in the right direction.
pub struct HashEncoder {
    dim: usize,
}

impl HashEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.to_lowercase().split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl TextEncoder for HashEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}
