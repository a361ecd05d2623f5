//! The custody simulator: drift, event rules, catastrophic conversion.
//!
//! All arithmetic is deterministic. [`CustodySimulator::apply`] never fails;
//! unrecognized or inert events only incur drift.

use custody_core::constants::{
    DEVICE_CONTROL_DELTA, DRIFT_RATE_PER_WINDOW, LEAKAGE_CONVERSION_THRESHOLD,
    LEAKAGE_EXPOSURE_DELTA, MEMORY_CONTROL_DELTA, SCALAR_MIN, STRESS_CONTROL_DELTA,
    STRESS_EXPOSURE_DELTA, VERIFICATION_GRACE_DAYS,
};
use custody_core::{CustodyState, FailureEvent, FailureMode, RuleGroup, TimelineEvent};
use tracing::{debug, info, trace, warn};

use crate::report::SimulationReport;

/// Owns one [`CustodyState`] and drives it through a timeline of events.
///
/// Every rule that changes the state appends one narration line to the log.
/// Drift is silent.
#[derive(Debug, Clone, Default)]
pub struct CustodySimulator {
    state: CustodyState,
    log: Vec<String>,
    events_applied: usize,
    halted_at: Option<TimelineEvent>,
}

/// Exposure added by drift for a verification gap of `days_since_verify` days.
///
/// Zero inside the grace window, then linear in the full gap.
fn drift_exposure(days_since_verify: i64) -> f64 {
    if days_since_verify > VERIFICATION_GRACE_DAYS {
        DRIFT_RATE_PER_WINDOW * (days_since_verify as f64 / VERIFICATION_GRACE_DAYS as f64)
    } else {
        0.0
    }
}

impl CustodySimulator {
    /// Simulator over a fresh default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator over a caller-seeded state.
    pub fn with_state(state: CustodyState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &CustodyState {
        &self.state
    }

    /// Mutable access for seeding (e.g. `mark_verified`) before a run.
    pub fn state_mut(&mut self) -> &mut CustodyState {
        &mut self.state
    }

    /// Narration lines, in firing order.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn events_applied(&self) -> usize {
        self.events_applied
    }

    pub fn halted_at(&self) -> Option<TimelineEvent> {
        self.halted_at
    }

    pub fn into_state(self) -> CustodyState {
        self.state
    }

    /// Snapshot of state, log, and halt bookkeeping.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            state: self.state.clone(),
            log: self.log.clone(),
            events_applied: self.events_applied,
            halted_at: self.halted_at,
        }
    }

    pub fn into_report(self) -> SimulationReport {
        SimulationReport {
            state: self.state,
            log: self.log,
            events_applied: self.events_applied,
            halted_at: self.halted_at,
        }
    }

    /// Apply one event on `day`: drift, then the event's rule, then
    /// catastrophic conversion, then clamp.
    pub fn apply(&mut self, day: i64, event: FailureEvent) {
        let s = &mut self.state;

        let days_since_verify = s.days_since_verified(day);
        let drift = drift_exposure(days_since_verify);
        if drift > 0.0 {
            trace!(day, days_since_verify, drift, "custody: verification drift");
            s.exposure += drift;
        }

        match event.rule_group() {
            RuleGroup::SilentLeakage => {
                s.exposure += LEAKAGE_EXPOSURE_DELTA;
                debug!(day, %event, exposure = s.exposure, "custody: leakage vector");
                self.log.push(format!(
                    "Day {day}: leakage vector introduced ({event}). Exposure ↑."
                ));
            }
            RuleGroup::DeviceDisruption => {
                s.assumptions.owner_has_device_access = false;
                s.control -= DEVICE_CONTROL_DELTA;
                debug!(day, %event, control = s.control, "custody: device disruption");
                self.log
                    .push(format!("Day {day}: device disruption ({event}). Control ↓."));
            }
            RuleGroup::MemoryDecay => {
                s.assumptions.owner_has_full_memory = false;
                s.control -= MEMORY_CONTROL_DELTA;
                debug!(day, control = s.control, "custody: memory decay");
                self.log
                    .push(format!("Day {day}: memory reliability degraded. Control ↓."));
            }
            RuleGroup::StressError => {
                s.assumptions.owner_behaves_consistently = false;
                s.control -= STRESS_CONTROL_DELTA;
                s.exposure += STRESS_EXPOSURE_DELTA;
                debug!(
                    day,
                    control = s.control,
                    exposure = s.exposure,
                    "custody: stress error"
                );
                self.log.push(format!(
                    "Day {day}: stress-driven operational error. Control ↓, Exposure ↑."
                ));
            }
            RuleGroup::HumanDiscontinuity => {
                // With succession in place the event is currently inert.
                if !s.assumptions.succession_exists {
                    s.control = SCALAR_MIN;
                    s.recoverable = false;
                    s.set_failure(FailureMode::Loss);
                    info!(day, failure_mode = %s.failure_mode, "custody: terminal loss");
                    self.log.push(format!(
                        "Day {day}: human discontinuity without succession. Terminal LOSS."
                    ));
                }
            }
            RuleGroup::Inert => {}
        }

        if s.failure_mode == FailureMode::None && s.exposure >= LEAKAGE_CONVERSION_THRESHOLD {
            s.control = SCALAR_MIN;
            s.recoverable = false;
            s.set_failure(FailureMode::Leakage);
            info!(day, exposure = s.exposure, "custody: exposure threshold crossed");
            self.log.push(format!(
                "Day {day}: exposure threshold crossed. LEAKAGE becomes terminal loss-of-control."
            ));
        }

        s.clamp();
    }

    /// Apply `timeline` in day order, stopping once the state is catastrophic.
    ///
    /// Same-day events keep their input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::{FailureEvent, FailureMode, TimelineEvent};
    /// use custody_sim::CustodySimulator;
    ///
    /// let mut sim = CustodySimulator::new();
    /// sim.state_mut().mark_verified(0);
    /// let state = sim.run([
    ///     TimelineEvent::new(120, FailureEvent::StressError),
    ///     TimelineEvent::new(7, FailureEvent::ScreenshotSeed),
    ///     TimelineEvent::new(45, FailureEvent::Infostealer),
    /// ]);
    /// assert_eq!(state.failure_mode, FailureMode::Leakage);
    /// assert_eq!(state.control, 0.0);
    /// ```
    pub fn run<I>(&mut self, timeline: I) -> &CustodyState
    where
        I: IntoIterator<Item = TimelineEvent>,
    {
        let mut ordered: Vec<TimelineEvent> = timeline.into_iter().collect();
        ordered.sort_by_key(|t| t.day);

        let total = ordered.len();
        for (index, t) in ordered.into_iter().enumerate() {
            if self.state.is_catastrophic() {
                warn!(
                    day = t.day,
                    event = %t.event,
                    skipped = total - index,
                    "custody: state catastrophic, halting run"
                );
                self.halted_at.get_or_insert(t);
                break;
            }
            self.apply(t.day, t.event);
            self.events_applied += 1;
        }

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn verified_sim() -> CustodySimulator {
        let mut sim = CustodySimulator::new();
        sim.state_mut().mark_verified(0);
        sim
    }

    fn any_event() -> impl Strategy<Value = FailureEvent> {
        prop::sample::select(FailureEvent::ALL.to_vec())
    }

    // --- drift ---

    #[test]
    fn no_drift_inside_grace_window() {
        assert_eq!(drift_exposure(0), 0.0);
        assert_eq!(drift_exposure(30), 0.0);
    }

    #[test]
    fn drift_linear_past_grace_window() {
        assert!((drift_exposure(31) - 0.01 * 31.0 / 30.0).abs() < EPS);
        assert!((drift_exposure(45) - 0.015).abs() < EPS);
        assert!((drift_exposure(120) - 0.04).abs() < EPS);
    }

    #[test]
    fn drift_is_silent() {
        let mut sim = verified_sim();
        sim.apply(300, FailureEvent::BadBackup);
        assert!((sim.state().exposure - 0.1).abs() < EPS);
        assert!(sim.log().is_empty());
    }

    #[test]
    fn negative_gap_yields_no_drift() {
        let mut sim = CustodySimulator::new();
        sim.state_mut().mark_verified(500);
        sim.apply(10, FailureEvent::BadBackup);
        assert_eq!(sim.state().exposure, 0.0);
    }

    // --- rules ---

    #[test]
    fn silent_leakage_raises_exposure() {
        for event in [
            FailureEvent::Phishing,
            FailureEvent::Infostealer,
            FailureEvent::CloudSyncLeak,
            FailureEvent::ScreenshotSeed,
        ] {
            let mut sim = verified_sim();
            sim.apply(1, event);
            assert!((sim.state().exposure - 0.35).abs() < EPS);
            assert_eq!(sim.state().control, 1.0);
            assert_eq!(
                sim.log(),
                [format!(
                    "Day 1: leakage vector introduced ({}). Exposure ↑.",
                    event.as_str()
                )]
            );
        }
    }

    #[test]
    fn device_disruption_drops_control() {
        for event in [FailureEvent::DeviceTheft, FailureEvent::DeviceFailure] {
            let mut sim = verified_sim();
            sim.apply(2, event);
            let s = sim.state();
            assert!((s.control - 0.55).abs() < EPS);
            assert!(!s.assumptions.owner_has_device_access);
            assert_eq!(s.exposure, 0.0);
            assert_eq!(
                sim.log(),
                [format!("Day 2: device disruption ({event}). Control ↓.")]
            );
        }
    }

    #[test]
    fn memory_decay_drops_control() {
        let mut sim = verified_sim();
        sim.apply(3, FailureEvent::MemoryDecay);
        let s = sim.state();
        assert!((s.control - 0.75).abs() < EPS);
        assert!(!s.assumptions.owner_has_full_memory);
        assert_eq!(sim.log(), ["Day 3: memory reliability degraded. Control ↓."]);
    }

    #[test]
    fn stress_error_hits_both_scalars() {
        let mut sim = verified_sim();
        sim.apply(4, FailureEvent::StressError);
        let s = sim.state();
        assert!((s.control - 0.8).abs() < EPS);
        assert!((s.exposure - 0.1).abs() < EPS);
        assert!(!s.assumptions.owner_behaves_consistently);
        assert_eq!(
            sim.log(),
            ["Day 4: stress-driven operational error. Control ↓, Exposure ↑."]
        );
    }

    #[test]
    fn death_without_succession_is_terminal_loss() {
        let mut sim = verified_sim();
        sim.state_mut().exposure = 0.5;
        sim.apply(9, FailureEvent::DeathNoSuccession);
        let s = sim.state();
        assert_eq!(s.control, 0.0);
        assert!(!s.recoverable);
        assert_eq!(s.failure_mode, FailureMode::Loss);
        assert_eq!(
            sim.log(),
            ["Day 9: human discontinuity without succession. Terminal LOSS."]
        );
    }

    #[test]
    fn death_with_succession_is_inert() {
        let mut sim = verified_sim();
        sim.state_mut().assumptions.succession_exists = true;
        let before = sim.state().clone();
        sim.apply(9, FailureEvent::DeathNoSuccession);
        assert_eq!(sim.state(), &before);
        assert!(sim.log().is_empty());
    }

    #[test]
    fn bad_backup_is_inert() {
        let mut sim = verified_sim();
        let before = sim.state().clone();
        sim.apply(5, FailureEvent::BadBackup);
        assert_eq!(sim.state(), &before);
        assert!(sim.log().is_empty());
    }

    #[test]
    fn device_losses_clamp_control_at_zero() {
        let mut sim = verified_sim();
        sim.apply(1, FailureEvent::DeviceTheft);
        sim.apply(2, FailureEvent::DeviceFailure);
        sim.apply(3, FailureEvent::DeviceTheft);
        assert_eq!(sim.state().control, 0.0);
        // Control collapse alone does not record a failure mode.
        assert_eq!(sim.state().failure_mode, FailureMode::None);
        assert!(sim.state().is_catastrophic());
    }

    // --- conversion ---

    #[test]
    fn exposure_threshold_converts_to_leakage() {
        let mut sim = verified_sim();
        sim.apply(1, FailureEvent::Phishing);
        sim.apply(2, FailureEvent::Infostealer);
        assert_eq!(sim.state().failure_mode, FailureMode::None);
        sim.apply(3, FailureEvent::CloudSyncLeak);
        let s = sim.state();
        assert_eq!(s.failure_mode, FailureMode::Leakage);
        assert_eq!(s.control, 0.0);
        assert!(!s.recoverable);
        assert_eq!(s.exposure, 1.0);
        assert_eq!(
            sim.log().last().map(String::as_str),
            Some("Day 3: exposure threshold crossed. LEAKAGE becomes terminal loss-of-control.")
        );
    }

    #[test]
    fn conversion_at_exact_threshold() {
        let mut sim = verified_sim();
        sim.state_mut().exposure = 0.85;
        sim.apply(1, FailureEvent::BadBackup);
        assert_eq!(sim.state().failure_mode, FailureMode::Leakage);
    }

    #[test]
    fn loss_is_not_overwritten_by_conversion() {
        let mut sim = verified_sim();
        sim.state_mut().exposure = 0.9;
        sim.apply(1, FailureEvent::DeathNoSuccession);
        assert_eq!(sim.state().failure_mode, FailureMode::Loss);
        assert_eq!(sim.log().len(), 1);
    }

    // --- run ---

    #[test]
    fn run_sorts_by_day() {
        let mut sim = verified_sim();
        sim.run([
            TimelineEvent::new(20, FailureEvent::MemoryDecay),
            TimelineEvent::new(10, FailureEvent::Phishing),
        ]);
        assert_eq!(
            sim.log(),
            [
                "Day 10: leakage vector introduced (phishing). Exposure ↑.",
                "Day 20: memory reliability degraded. Control ↓.",
            ]
        );
    }

    #[test]
    fn run_keeps_same_day_input_order() {
        let mut sim = verified_sim();
        sim.run([
            TimelineEvent::new(5, FailureEvent::StressError),
            TimelineEvent::new(5, FailureEvent::Phishing),
            TimelineEvent::new(1, FailureEvent::MemoryDecay),
        ]);
        assert!(sim.log()[1].contains("stress-driven"));
        assert!(sim.log()[2].contains("(phishing)"));
    }

    #[test]
    fn run_halts_after_catastrophe() {
        let mut sim = verified_sim();
        let final_state = sim
            .run([
                TimelineEvent::new(1, FailureEvent::DeathNoSuccession),
                TimelineEvent::new(2, FailureEvent::Phishing),
                TimelineEvent::new(3, FailureEvent::MemoryDecay),
            ])
            .clone();
        assert_eq!(final_state.exposure, 0.0);
        assert!(final_state.assumptions.owner_has_full_memory);
        assert_eq!(sim.log().len(), 1);
        assert_eq!(sim.events_applied(), 1);
        assert_eq!(
            sim.halted_at(),
            Some(TimelineEvent::new(2, FailureEvent::Phishing))
        );
    }

    #[test]
    fn run_on_seeded_catastrophic_state_applies_nothing() {
        let mut seeded = CustodyState::new();
        seeded.control = 0.0;
        let mut sim = CustodySimulator::with_state(seeded.clone());
        sim.run([TimelineEvent::new(1, FailureEvent::StressError)]);
        assert_eq!(sim.state(), &seeded);
        assert_eq!(sim.events_applied(), 0);
    }

    #[test]
    fn run_empty_timeline() {
        let mut sim = verified_sim();
        let state = sim.run(Vec::new()).clone();
        assert_eq!(state, CustodyState::default());
        assert!(!sim.report().halted_early());
    }

    #[test]
    fn into_report_carries_log() {
        let mut sim = verified_sim();
        sim.run([TimelineEvent::new(7, FailureEvent::ScreenshotSeed)]);
        let report = sim.into_report();
        assert_eq!(report.events_applied, 1);
        assert_eq!(report.log.len(), 1);
        assert!((report.state.exposure - 0.35).abs() < EPS);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn scalars_stay_in_range(
            steps in prop::collection::vec((-100i64..1000, any_event()), 0..40),
        ) {
            let mut sim = verified_sim();
            for (day, event) in steps {
                sim.apply(day, event);
                let s = sim.state();
                prop_assert!((0.0..=1.0).contains(&s.control));
                prop_assert!((0.0..=1.0).contains(&s.exposure));
            }
        }

        #[test]
        fn exposure_never_decreases(
            steps in prop::collection::vec((0i64..1000, any_event()), 0..40),
        ) {
            let mut sim = verified_sim();
            let mut prev = sim.state().exposure;
            for (day, event) in steps {
                sim.apply(day, event);
                prop_assert!(sim.state().exposure >= prev);
                prev = sim.state().exposure;
            }
        }

        #[test]
        fn failure_mode_is_sticky(
            steps in prop::collection::vec((0i64..1000, any_event()), 1..40),
        ) {
            let mut sim = verified_sim();
            let mut recorded = FailureMode::None;
            for (day, event) in steps {
                sim.apply(day, event);
                let s = sim.state();
                if recorded != FailureMode::None {
                    prop_assert_eq!(s.failure_mode, recorded);
                    prop_assert_eq!(s.control, 0.0);
                }
                if s.failure_mode != FailureMode::None {
                    prop_assert_eq!(s.control, 0.0);
                    prop_assert!(!s.recoverable);
                    recorded = s.failure_mode;
                }
            }
        }

        #[test]
        fn run_never_applies_past_catastrophe(
            timeline in prop::collection::vec((0i64..400, any_event()), 0..30),
        ) {
            let timeline: Vec<TimelineEvent> = timeline
                .into_iter()
                .map(|(day, event)| TimelineEvent::new(day, event))
                .collect();
            let mut sim = verified_sim();
            sim.run(timeline.clone());

            // Replaying the sorted prefix by hand must reach the same state
            // and stop at the same point.
            let mut sorted = timeline;
            sorted.sort_by_key(|t| t.day);
            let mut manual = verified_sim();
            let mut applied = 0;
            for t in &sorted {
                if manual.state().is_catastrophic() {
                    break;
                }
                manual.apply(t.day, t.event);
                applied += 1;
            }
            prop_assert_eq!(sim.events_applied(), applied);
            prop_assert_eq!(sim.state(), manual.state());
            prop_assert_eq!(sim.log(), manual.log());
            prop_assert_eq!(sim.halted_at(), sorted.get(applied).copied());
        }
    }
}
