use serde::{Deserialize, Serialize};

/// Emitted once per position as an evaluation pass advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Positions finished so far, including this one
    pub completed: usize,

    /// Positions in the pass
    pub total: usize,

    /// Symbol that just finished
    pub symbol: String,

    /// `false` when the position was skipped because no price was found
    pub succeeded: bool,
}

impl Progress {
    /// Share of the pass that is done, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed.min(self.total) as f64) / (self.total as f64)
    }
}
