//! Rendering of the recorded native call journal

use crate::app::scenario::ReplayOutcome;
use crate::maps::api::RecordedCall;
use colored::*;

/// Pretty JSON array of every recorded call
pub fn render_json(calls: &[RecordedCall]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(calls)
}

/// One line per call: sequence, method, native handle and argument
pub fn render_text(calls: &[RecordedCall]) -> String {
    calls
        .iter()
        .enumerate()
        .map(|(index, call)| {
            format!(
                "{:>4} {:<14} {} {}",
                format!("#{}", index + 1).dimmed(),
                call.method().bold(),
                format!("handle={}", call.handle()).cyan(),
                argument(call)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Closing summary line
pub fn render_summary(outcome: &ReplayOutcome, call_count: usize) -> String {
    if outcome.is_success() {
        format!(
            "{} {} steps replayed, {} native calls",
            "OK".green().bold(),
            outcome.steps_run,
            call_count
        )
    } else {
        let mut lines = vec![format!(
            "{} {} of {} steps failed",
            "FAILED".red().bold(),
            outcome.failures.len(),
            outcome.steps_run
        )];
        lines.extend(
            outcome
                .failures
                .iter()
                .map(|failure| format!("  step {}: {}", failure.step, failure.message)),
        );
        lines.join("\n")
    }
}

fn argument(call: &RecordedCall) -> String {
    let value = match call {
        RecordedCall::CreateMarker { options, .. } => serde_json::to_value(options),
        RecordedCall::SetProperty { property, .. } => {
            serde_json::to_value(property).map(|tagged| tagged["value"].clone())
        }
        RecordedCall::SetMap { map, .. } => {
            serde_json::to_value(map.as_ref().map(|handle| handle.id()))
        }
        RecordedCall::AddListener { kind, .. } => serde_json::to_value(kind),
    };
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|e| format!("<unrenderable: {}>", e))
}
