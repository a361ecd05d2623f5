//! Timeline assembly: the built-in demo, JSON timeline files, and inline events.

use std::path::Path;

use anyhow::{Context, Result};
use custody_core::{FailureEvent, TimelineEvent};

/// The canonical walkthrough: a photographed seed, an infostealer weeks
/// later, then a stress error once verification has long lapsed.
pub fn demo_timeline() -> Vec<TimelineEvent> {
    vec![
        TimelineEvent::new(7, FailureEvent::ScreenshotSeed),
        TimelineEvent::new(45, FailureEvent::Infostealer),
        TimelineEvent::new(120, FailureEvent::StressError),
    ]
}

/// Read a JSON array of `{"day": N, "event": "tag"}` objects.
pub fn load_timeline(path: &Path) -> Result<Vec<TimelineEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timeline: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid timeline JSON: {}", path.display()))
}

/// File events first, then inline events, in the order given.
///
/// Ordering by day is left to the simulator.
pub fn collect_timeline(
    file: Option<&Path>,
    inline: Vec<TimelineEvent>,
) -> Result<Vec<TimelineEvent>> {
    let mut timeline = match file {
        Some(path) => load_timeline(path)?,
        None => Vec::new(),
    };
    timeline.extend(inline);
    Ok(timeline)
}
