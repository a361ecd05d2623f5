//! Shared test helpers for scenario and property tests.

use custody_core::{FailureEvent, TimelineEvent};
use custody_sim::CustodySimulator;

/// Tolerance for comparing accumulated exposure.
pub const EPS: f64 = 1e-9;

/// Simulator over a default state verified at day 0.
pub fn fresh_sim() -> CustodySimulator {
    let mut sim = CustodySimulator::new();
    sim.state_mut().mark_verified(0);
    sim
}

/// Build a timeline from `(day, event)` pairs, keeping input order.
pub fn timeline(pairs: &[(i64, FailureEvent)]) -> Vec<TimelineEvent> {
    pairs
        .iter()
        .map(|&(day, event)| TimelineEvent::new(day, event))
        .collect()
}

/// Approximate float equality within [`EPS`].
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}
