//! Custody risk posture.
//!
//! [`CustodyState`] is pure bookkeeping: two clamped scalars, a
//! recoverability flag, a verification timestamp, a write-once failure
//! classification, and the trust assumptions about the owner. It holds no
//! event logic; the simulator mutates it.
//!
//! # Invariants
//!
//! * `control` and `exposure` lie in `[0.0, 1.0]` after [`CustodyState::clamp`].
//! * `failure_mode` is write-once: once it leaves [`FailureMode::None`] it never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{SCALAR_MAX, SCALAR_MIN};

/// Terminal failure classification.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    None,
    /// The secret was copied; an outside party holds control.
    Leakage,
    /// The secret is unavailable even to its rightful owner.
    Loss,
}

impl FailureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Leakage => "leakage",
            Self::Loss => "loss",
        }
    }

    /// True for any mode other than [`FailureMode::None`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key for one trust assumption in [`TrustAssumptions`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Assumption {
    OwnerHasFullMemory,
    OwnerHasDeviceAccess,
    OwnerBehavesConsistently,
    SuccessionExists,
}

impl Assumption {
    pub const ALL: [Assumption; 4] = [
        Self::OwnerHasFullMemory,
        Self::OwnerHasDeviceAccess,
        Self::OwnerBehavesConsistently,
        Self::SuccessionExists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OwnerHasFullMemory => "owner_has_full_memory",
            Self::OwnerHasDeviceAccess => "owner_has_device_access",
            Self::OwnerBehavesConsistently => "owner_behaves_consistently",
            Self::SuccessionExists => "succession_exists",
        }
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assumptions about the owner and environment that tend to break in real life.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrustAssumptions {
    pub owner_has_full_memory: bool,
    pub owner_has_device_access: bool,
    pub owner_behaves_consistently: bool,
    /// Whether custody can pass to someone else if the owner dies.
    pub succession_exists: bool,
}

impl Default for TrustAssumptions {
    fn default() -> Self {
        Self {
            owner_has_full_memory: true,
            owner_has_device_access: true,
            owner_behaves_consistently: true,
            succession_exists: false,
        }
    }
}

impl TrustAssumptions {
    /// Look up an assumption by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::{Assumption, TrustAssumptions};
    /// let a = TrustAssumptions::default();
    /// assert!(a.get(Assumption::OwnerHasFullMemory));
    /// assert!(!a.get(Assumption::SuccessionExists));
    /// ```
    pub fn get(&self, key: Assumption) -> bool {
        match key {
            Assumption::OwnerHasFullMemory => self.owner_has_full_memory,
            Assumption::OwnerHasDeviceAccess => self.owner_has_device_access,
            Assumption::OwnerBehavesConsistently => self.owner_behaves_consistently,
            Assumption::SuccessionExists => self.succession_exists,
        }
    }

    pub fn set(&mut self, key: Assumption, value: bool) {
        let slot = match key {
            Assumption::OwnerHasFullMemory => &mut self.owner_has_full_memory,
            Assumption::OwnerHasDeviceAccess => &mut self.owner_has_device_access,
            Assumption::OwnerBehavesConsistently => &mut self.owner_behaves_consistently,
            Assumption::SuccessionExists => &mut self.succession_exists,
        };
        *slot = value;
    }

    /// All `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Assumption, bool)> + '_ {
        Assumption::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl fmt::Display for TrustAssumptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Custody of a private secret, modeled without storing the secret.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustodyState {
    /// Control the rightful owner retains (1.0 = full, 0.0 = none).
    pub control: f64,
    /// Cumulative risk that the secret has leaked (0.0 = none, 1.0 = fully exposed).
    pub exposure: f64,
    /// Whether the owner can restore control by design rather than by luck.
    pub recoverable: bool,
    /// Day custody was last explicitly verified by the owner or system.
    pub last_verified_day: i64,
    pub failure_mode: FailureMode,
    pub assumptions: TrustAssumptions,
}

impl Default for CustodyState {
    fn default() -> Self {
        Self {
            control: SCALAR_MAX,
            exposure: SCALAR_MIN,
            recoverable: true,
            last_verified_day: 0,
            failure_mode: FailureMode::None,
            assumptions: TrustAssumptions::default(),
        }
    }
}

/// Clamp into `[0.0, 1.0]`; NaN collapses to the lower bound.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        SCALAR_MIN
    } else {
        value.clamp(SCALAR_MIN, SCALAR_MAX)
    }
}

impl CustodyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `control` and `exposure` into `[0.0, 1.0]`. Idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::CustodyState;
    /// let mut s = CustodyState { control: -0.2, exposure: 1.4, ..CustodyState::default() };
    /// s.clamp();
    /// assert_eq!((s.control, s.exposure), (0.0, 1.0));
    /// ```
    pub fn clamp(&mut self) {
        self.control = clamp_unit(self.control);
        self.exposure = clamp_unit(self.exposure);
    }

    /// Record that custody was freshly confirmed on `day`.
    pub fn mark_verified(&mut self, day: i64) {
        self.last_verified_day = day;
    }

    /// Record the terminal failure mode. First writer wins; later calls are no-ops.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::{CustodyState, FailureMode};
    /// let mut s = CustodyState::new();
    /// s.set_failure(FailureMode::Loss);
    /// s.set_failure(FailureMode::Leakage);
    /// assert_eq!(s.failure_mode, FailureMode::Loss);
    /// ```
    pub fn set_failure(&mut self, mode: FailureMode) {
        if self.failure_mode == FailureMode::None {
            self.failure_mode = mode;
        }
    }

    /// Control is gone or a terminal failure has been recorded.
    pub fn is_catastrophic(&self) -> bool {
        self.control <= SCALAR_MIN || self.failure_mode.is_terminal()
    }

    /// Days elapsed since the last verification, never negative.
    pub fn days_since_verified(&self, day: i64) -> i64 {
        day.saturating_sub(self.last_verified_day).max(0)
    }
}

impl fmt::Display for CustodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CustodyState(control={}, exposure={}, recoverable={}, last_verified_day={}, failure_mode={}, assumptions={})",
            self.control,
            self.exposure,
            self.recoverable,
            self.last_verified_day,
            self.failure_mode,
            self.assumptions,
        )
    }
}
