//! Serializable summary of a finished simulation.

use custody_core::{CustodyState, TimelineEvent};
use serde::{Deserialize, Serialize};

/// Final state, narration log, and halt bookkeeping of a simulator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimulationReport {
    pub state: CustodyState,
    pub log: Vec<String>,
    /// Number of events passed to `apply`.
    pub events_applied: usize,
    /// First event skipped because the state was already catastrophic.
    pub halted_at: Option<TimelineEvent>,
}

impl SimulationReport {
    /// True when the run stopped before consuming its whole timeline.
    pub fn halted_early(&self) -> bool {
        self.halted_at.is_some()
    }
}
