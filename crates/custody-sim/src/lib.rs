//! # custody-sim — Event-driven custody degradation.
//!
//! Applies a chronologically sorted timeline of [`FailureEvent`]s to a single
//! owned [`CustodyState`]:
//! - **Drift**: custody left unverified past a 30-day grace window leaks
//!   exposure linearly, before any event effect.
//! - **Event rules**: fixed-magnitude, deterministic adjustments per
//!   [`RuleGroup`](custody_core::RuleGroup).
//! - **Catastrophic conversion**: exposure at or above the threshold is
//!   assumed to be exploited, turning silent leakage into terminal LEAKAGE.
//! - **Early halt**: once the state is catastrophic, remaining events are
//!   skipped.
//!
//! [`FailureEvent`]: custody_core::FailureEvent
//! [`CustodyState`]: custody_core::CustodyState

pub mod engine;
pub mod report;

pub use engine::CustodySimulator;
pub use report::SimulationReport;
