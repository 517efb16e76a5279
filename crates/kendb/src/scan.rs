use std::collections::HashMap;

use bitvec::vec::BitVec;
use tracing::error;

use crate::column::Column;

/// Per-query scratch space: one ordered bitmap per variable name, bit `i`
/// telling whether the column's `i`th entry is part of the selection.
/// Pools are process-local and never persisted.
pub type VariablePool = HashMap<String, BitVec>;

/// One selected entry, with its features copied out of the mapping so the
/// value stays valid across later appends and file growth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub timestamp: u64,
    pub features: Vec<f32>,
}

impl Column {
    /// Append one bit per entry to `pool[var_name]`, set for timestamps in
    /// the half-open range `[start_ts, end_ts)`. An existing bitmap is
    /// extended, not replaced; use a fresh name for a fresh selection.
    pub fn select(&self, start_ts: i64, end_ts: i64, var_name: &str, pool: &mut VariablePool) {
        let store = self.store.read();
        self.select_into(store.bytes(), start_ts, end_ts, var_name, pool);
    }

    pub(crate) fn select_into(
        &self,
        b: &[u8],
        start_ts: i64,
        end_ts: i64,
        var_name: &str,
        pool: &mut VariablePool,
    ) {
        let bits = pool.entry(var_name.to_string()).or_default();
        self.for_each_entry(b, |_, ts, _| {
            bits.push(ts >= start_ts as u64 && ts < end_ts as u64);
        });
    }

    /// Copy out the entries whose bit is set, in column order. An unknown
    /// variable name logs an error and yields nothing.
    pub fn fetch(&self, var_name: &str, pool: &VariablePool) -> Vec<Vector> {
        let store = self.store.read();
        self.fetch_in(store.bytes(), var_name, pool)
    }

    pub(crate) fn fetch_in(&self, b: &[u8], var_name: &str, pool: &VariablePool) -> Vec<Vector> {
        let Some(bits) = pool.get(var_name) else {
            error!(var_name, "variable is not in the pool");
            return Vec::new();
        };

        let mut selected = Vec::new();
        self.for_each_entry(b, |idx, ts, features| {
            if bits.get(idx as usize).is_some_and(|bit| *bit) {
                selected.push(Vector { timestamp: ts, features: features.to_vec() });
            }
        });
        selected
    }

    /// Fold the selected entries with `combine`. The first selected entry
    /// seeds the accumulator; later entries come in as the first argument,
    /// the accumulator as the second. An unknown name or empty selection
    /// yields a zero vector of the column's dimension.
    pub(crate) fn reduce_in(
        &self,
        b: &[u8],
        var_name: &str,
        pool: &VariablePool,
        mut combine: impl FnMut(Vector, Vector) -> Vector,
    ) -> Vector {
        let Some(bits) = pool.get(var_name) else {
            error!(var_name, "variable is not in the pool");
            return self.zero_vector();
        };

        let mut acc: Option<Vector> = None;
        self.for_each_entry(b, |idx, ts, features| {
            if bits.get(idx as usize).is_some_and(|bit| *bit) {
                let entry = Vector { timestamp: ts, features: features.to_vec() };
                acc = Some(match acc.take() {
                    None => entry,
                    Some(prev) => combine(entry, prev),
                });
            }
        });
        acc.unwrap_or_else(|| self.zero_vector())
    }

    fn zero_vector(&self) -> Vector {
        Vector { timestamp: 0, features: vec![0.0; self.meta.vector_length as usize] }
    }
}
