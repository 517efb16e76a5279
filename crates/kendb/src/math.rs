use crate::column::Column;
use crate::scan::{VariablePool, Vector};

fn add(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

fn mul(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

fn div_scalar(a: &[f32], divisor: f32) -> Vec<f32> {
    a.iter().map(|x| x / divisor).collect()
}

/// Cosine similarity of two equal-length vectors, in `[-1, 1]` for
/// non-zero inputs. Single precision throughout.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

impl Column {
    /// Element-wise sum of the selected vectors.
    pub fn sum(&self, var_name: &str, pool: &VariablePool) -> Vec<f32> {
        let store = self.store.read();
        self.sum_in(store.bytes(), var_name, pool)
    }

    pub(crate) fn sum_in(&self, b: &[u8], var_name: &str, pool: &VariablePool) -> Vec<f32> {
        self.reduce_in(b, var_name, pool, |entry, acc| Vector {
            timestamp: 0,
            features: add(&entry.features, &acc.features),
        })
        .features
    }

    /// Element-wise product of the selected vectors.
    pub fn prod(&self, var_name: &str, pool: &VariablePool) -> Vec<f32> {
        let store = self.store.read();
        self.reduce_in(store.bytes(), var_name, pool, |entry, acc| Vector {
            timestamp: 0,
            features: mul(&entry.features, &acc.features),
        })
        .features
    }

    /// Element-wise sum scaled down by the vector dimension. Note the
    /// divisor: it is the feature length, not the selection count, so this
    /// is a scaled centroid rather than a true mean. Cosine similarity is
    /// scale-invariant, which keeps the distance operations unaffected.
    pub(crate) fn avg_in(&self, b: &[u8], var_name: &str, pool: &VariablePool) -> Vec<f32> {
        let sum = self.sum_in(b, var_name, pool);
        let divisor = sum.len() as f32;
        div_scalar(&sum, divisor)
    }

    /// Cosine similarity between the selection's centroid and `target`.
    /// Centroid distance is preferred over averaging per-entry distances.
    pub fn dist_avg(&self, var_name: &str, pool: &VariablePool, target: &[f32]) -> f32 {
        let store = self.store.read();
        self.dist_avg_in(store.bytes(), var_name, pool, target)
    }

    pub(crate) fn dist_avg_in(
        &self,
        b: &[u8],
        var_name: &str,
        pool: &VariablePool,
        target: &[f32],
    ) -> f32 {
        let avg = self.avg_in(b, var_name, pool);
        cosine_similarity(&avg, target)
    }

    /// The selected entry least similar to `target`.
    pub fn dist_min(&self, var_name: &str, pool: &VariablePool, target: &[f32]) -> Vector {
        let store = self.store.read();
        self.reduce_in(store.bytes(), var_name, pool, |entry, acc| {
            if cosine_similarity(&entry.features, target) > cosine_similarity(&acc.features, target)
            {
                acc
            } else {
                entry
            }
        })
    }

    /// The selected entry most similar to `target`.
    pub fn dist_max(&self, var_name: &str, pool: &VariablePool, target: &[f32]) -> Vector {
        let store = self.store.read();
        self.reduce_in(store.bytes(), var_name, pool, |entry, acc| {
            if cosine_similarity(&entry.features, target) > cosine_similarity(&acc.features, target)
            {
                entry
            } else {
                acc
            }
        })
    }
}
