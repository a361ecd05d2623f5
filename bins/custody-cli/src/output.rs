//! Rendering of simulation results for stdout.

use anyhow::{Context, Result};
use custody_core::FailureEvent;
use custody_sim::SimulationReport;

use crate::config::OutputFormat;

/// Final state block followed by the narration log.
pub fn render_text(report: &SimulationReport) -> String {
    let mut out = String::new();
    out.push_str("=== FINAL STATE ===\n");
    out.push_str(&report.state.to_string());
    out.push_str("\n\n=== LOG ===\n");
    for line in &report.log {
        out.push_str("- ");
        out.push_str(line);
        out.push('\n');
    }
    if let Some(halt) = report.halted_at {
        out.push_str(&format!(
            "\n(halted before {halt}; {} event(s) applied)\n",
            report.events_applied
        ));
    }
    out
}

pub fn render_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

pub fn render(report: &SimulationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// One line per event tag with the rule group it fires.
pub fn render_events(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(FailureEvent::ALL
            .iter()
            .map(|e| format!("{:<22}{}\n", e.as_str(), e.rule_group()))
            .collect()),
        OutputFormat::Json => {
            let entries: Vec<_> = FailureEvent::ALL
                .iter()
                .map(|e| serde_json::json!({ "event": e, "rule_group": e.rule_group() }))
                .collect();
            serde_json::to_string_pretty(&entries).context("Failed to serialize events")
        }
    }
}
