use rayon::prelude::*;
use uuid::Uuid;

use crate::column::Column;
use crate::scan::VariablePool;

/// Variable name the winning window is bound under.
const FINAL_VAR: &str = "final";

/// Best window found for one start index.
#[derive(Clone, Copy, Debug)]
struct WindowScore {
    start_ts: i64,
    end_ts: i64,
    score: f32,
}

impl Default for WindowScore {
    fn default() -> Self {
        WindowScore { start_ts: 0, end_ts: 0, score: f32::INFINITY }
    }
}

impl Column {
    /// Windowed nearest-window search: score every contiguous timestamp
    /// window `[ts_i, ts_j)` of this column by the cosine similarity of its
    /// centroid to `target`, greedily per start index, then bind the
    /// winning window in `pool` under the returned variable name.
    ///
    /// Aggregation across start indices keeps the scoring loop's legacy
    /// behavior: the running minimum is never tightened, so the last start
    /// index that scored any window wins. [`Column::ikeji_exact`] applies
    /// the strict minimum instead.
    pub fn ikeji(&self, target: &[f32], pool: &mut VariablePool) -> String {
        let min_score = f32::INFINITY;
        let mut winner = WindowScore::default();
        for window in self.best_windows(target) {
            if window.score < min_score {
                winner = window;
            }
        }
        self.select(winner.start_ts, winner.end_ts, FINAL_VAR, pool);
        FINAL_VAR.to_string()
    }

    /// [`Column::ikeji`] with strict aggregation: the window with the
    /// lowest score across all start indices wins.
    pub fn ikeji_exact(&self, target: &[f32], pool: &mut VariablePool) -> String {
        let mut min_score = f32::INFINITY;
        let mut winner = WindowScore::default();
        for window in self.best_windows(target) {
            if window.score < min_score {
                min_score = window.score;
                winner = window;
            }
        }
        self.select(winner.start_ts, winner.end_ts, FINAL_VAR, pool);
        FINAL_VAR.to_string()
    }

    /// Evaluate every start index, each worker against its own private
    /// variable pool. Workers only read, so they fan out freely.
    fn best_windows(&self, target: &[f32]) -> Vec<WindowScore> {
        (0..self.len())
            .into_par_iter()
            .map(|start_idx| self.best_window_from(start_idx, target))
            .collect()
    }

    /// Greedy scan of the windows opening at `start_idx`: keep extending
    /// the window while each longer one improves the score, stop at the
    /// first one that does not.
    fn best_window_from(&self, start_idx: i64, target: &[f32]) -> WindowScore {
        let store = self.store.read();
        let b = store.bytes();

        let mut pool = VariablePool::new();
        let mut best = WindowScore::default();
        let mut start_ts = 0i64;

        self.for_each_entry_until(b, |idx, ts, _| {
            if idx < start_idx {
                return true;
            }
            if idx == start_idx {
                start_ts = ts as i64;
                return true;
            }
            let var_name = Uuid::new_v4().to_string();
            self.select_into(b, start_ts, ts as i64, &var_name, &mut pool);
            let score = self.dist_avg_in(b, &var_name, &pool, target);
            if score < best.score {
                best = WindowScore { start_ts, end_ts: ts as i64, score };
                true
            } else {
                false
            }
        });

        best
    }
}
