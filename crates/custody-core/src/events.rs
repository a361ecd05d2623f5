//! Failure events and timeline entries.
//!
//! [`FailureEvent`] is the closed vocabulary of real-world patterns that erode
//! custody. Its lowercase tags (`"phishing"`, `"death_no_succession"`, ...) are
//! a stable external vocabulary shared by `Display`, `FromStr`, and serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EventParseError, TimelineParseError};

/// A recurring real-world failure pattern. Carries no payload.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureEvent {
    Phishing,
    Infostealer,
    DeviceTheft,
    DeviceFailure,
    /// Declared but inert: no transition rule exists for it.
    BadBackup,
    ScreenshotSeed,
    CloudSyncLeak,
    MemoryDecay,
    DeathNoSuccession,
    StressError,
}

/// Which transition rule an event fires.
///
/// Events in the same group share one rule; the simulator matches on this
/// exhaustively.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    /// Compromise that stays invisible until exploited.
    SilentLeakage,
    /// The owner loses the device holding the secret.
    DeviceDisruption,
    MemoryDecay,
    StressError,
    /// Owner discontinuity (death) without a succession plan.
    HumanDiscontinuity,
    /// No rule fires.
    Inert,
}

impl FailureEvent {
    /// Every event, in declaration order.
    pub const ALL: [FailureEvent; 10] = [
        Self::Phishing,
        Self::Infostealer,
        Self::DeviceTheft,
        Self::DeviceFailure,
        Self::BadBackup,
        Self::ScreenshotSeed,
        Self::CloudSyncLeak,
        Self::MemoryDecay,
        Self::DeathNoSuccession,
        Self::StressError,
    ];

    /// Stable lowercase tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::FailureEvent;
    /// assert_eq!(FailureEvent::ScreenshotSeed.as_str(), "screenshot_seed");
    /// assert_eq!(FailureEvent::DeathNoSuccession.as_str(), "death_no_succession");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing => "phishing",
            Self::Infostealer => "infostealer",
            Self::DeviceTheft => "device_theft",
            Self::DeviceFailure => "device_failure",
            Self::BadBackup => "bad_backup",
            Self::ScreenshotSeed => "screenshot_seed",
            Self::CloudSyncLeak => "cloud_sync_leak",
            Self::MemoryDecay => "memory_decay",
            Self::DeathNoSuccession => "death_no_succession",
            Self::StressError => "stress_error",
        }
    }

    /// The rule group this event dispatches to.
    ///
    /// # Examples
    ///
    /// ```
    /// use custody_core::{FailureEvent, RuleGroup};
    /// assert_eq!(FailureEvent::Phishing.rule_group(), RuleGroup::SilentLeakage);
    /// assert_eq!(FailureEvent::BadBackup.rule_group(), RuleGroup::Inert);
    /// ```
    pub fn rule_group(&self) -> RuleGroup {
        match self {
            Self::Phishing | Self::Infostealer | Self::CloudSyncLeak | Self::ScreenshotSeed => {
                RuleGroup::SilentLeakage
            }
            Self::DeviceTheft | Self::DeviceFailure => RuleGroup::DeviceDisruption,
            Self::MemoryDecay => RuleGroup::MemoryDecay,
            Self::StressError => RuleGroup::StressError,
            Self::DeathNoSuccession => RuleGroup::HumanDiscontinuity,
            Self::BadBackup => RuleGroup::Inert,
        }
    }
}

impl fmt::Display for FailureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == tag)
            .ok_or_else(|| EventParseError::UnknownTag(tag.to_string()))
    }
}

impl RuleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SilentLeakage => "silent_leakage",
            Self::DeviceDisruption => "device_disruption",
            Self::MemoryDecay => "memory_decay",
            Self::StressError => "stress_error",
            Self::HumanDiscontinuity => "human_discontinuity",
            Self::Inert => "inert",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure event pinned to the logical day it occurred.
///
/// Days are signed and unbounded; negative or out-of-order days are accepted
/// and sorted by the simulator.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEvent {
    pub day: i64,
    pub event: FailureEvent,
}

impl TimelineEvent {
    pub fn new(day: i64, event: FailureEvent) -> Self {
        Self { day, event }
    }
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.day, self.event)
    }
}

/// Parses the compact `DAY:EVENT` form.
///
/// # Examples
///
/// ```
/// use custody_core::{FailureEvent, TimelineEvent};
/// let t: TimelineEvent = "45:infostealer".parse().unwrap();
/// assert_eq!(t, TimelineEvent::new(45, FailureEvent::Infostealer));
/// ```
impl FromStr for TimelineEvent {
    type Err = TimelineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, event) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimelineParseError::MissingSeparator(s.to_string()))?;
        let day = day
            .trim()
            .parse::<i64>()
            .map_err(|_| TimelineParseError::InvalidDay(day.to_string()))?;
        Ok(Self::new(day, event.parse()?))
    }
}
