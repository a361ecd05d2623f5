//! Model constants. Scalars are dimensionless fractions in `[0.0, 1.0]`,
//! days are logical simulation days.

/// Lower bound of every custody scalar.
pub const SCALAR_MIN: f64 = 0.0;

/// Upper bound of every custody scalar.
pub const SCALAR_MAX: f64 = 1.0;

/// Days custody may go unverified before exposure starts drifting upward.
pub const VERIFICATION_GRACE_DAYS: i64 = 30;

/// Exposure added per grace window elapsed since the last verification.
///
/// Drift is linear: `DRIFT_RATE_PER_WINDOW * days_since_verify / VERIFICATION_GRACE_DAYS`,
/// applied only once the gap exceeds [`VERIFICATION_GRACE_DAYS`].
pub const DRIFT_RATE_PER_WINDOW: f64 = 0.01;

/// Exposure added by a silent leakage vector (phishing, infostealer, ...).
pub const LEAKAGE_EXPOSURE_DELTA: f64 = 0.35;

/// Control removed by theft or failure of the custody device.
pub const DEVICE_CONTROL_DELTA: f64 = 0.45;

/// Control removed when the owner's memory of the secret degrades.
pub const MEMORY_CONTROL_DELTA: f64 = 0.25;

/// Control removed by a stress-driven operational error.
pub const STRESS_CONTROL_DELTA: f64 = 0.20;

/// Exposure added by a stress-driven operational error.
pub const STRESS_EXPOSURE_DELTA: f64 = 0.10;

/// Exposure at or above which an attacker is assumed to act.
///
/// Crossing it converts silent leakage into terminal loss of control.
pub const LEAKAGE_CONVERSION_THRESHOLD: f64 = 0.85;
