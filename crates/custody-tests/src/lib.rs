//! Cross-crate test suite for the custody simulator.
//!
//! Scenario tests replay the canonical timelines end to end; property tests
//! hammer the simulator with random timelines and check its invariants.

pub mod helpers;
