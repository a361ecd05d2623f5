//! # custody-core
//! Foundation types for the custody degradation model.
//!
//! Nothing here touches the secret itself. A [`CustodyState`] only tracks how
//! much control the rightful owner retains, how exposed the secret is, and
//! which trust assumptions about the owner still hold.

pub mod constants;
pub mod error;
pub mod events;
pub mod state;

pub use error::{EventParseError, TimelineParseError};
pub use events::{FailureEvent, RuleGroup, TimelineEvent};
pub use state::{Assumption, CustodyState, FailureMode, TrustAssumptions};
