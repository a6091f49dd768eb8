//! Text summary builder for CLI output.
//!
//! Formats human-readable lines for a finished playback run.

use crate::model::PlaybackReport;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from a playback report.
pub(crate) fn build_text_summary(report: &PlaybackReport) -> TextSummary {
    let mut lines = Vec::new();

    if report.notation.is_empty() {
        lines.push("Moves: (none)".to_string());
    } else {
        lines.push(format!("Moves: {}", report.notation));
    }
    if let Some(initial) = report.config.initial_sequence.as_deref() {
        if !initial.trim().is_empty() {
            lines.push(format!("Initial sequence: {initial}"));
        }
    }
    lines.push(format!(
        "Tokens: {}  Rotations: {}  Failed: {}",
        report.tokens, report.executed, report.failed
    ));
    lines.push(format!(
        "Speed: {} per turn",
        humantime::format_duration(report.config.speed)
    ));
    // Millisecond resolution is plenty for animation timing.
    let elapsed = std::time::Duration::from_millis(report.elapsed.as_millis() as u64);
    lines.push(format!("Elapsed: {}", humantime::format_duration(elapsed)));
    lines.push(format!("Finished: {}", report.timestamp_utc));

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayConfig;
    use std::time::Duration;

    fn report(notation: &str) -> PlaybackReport {
        PlaybackReport {
            timestamp_utc: "2026-01-01T00:00:00Z".into(),
            input: notation.into(),
            notation: notation.into(),
            tokens: 4,
            executed: 4,
            failed: 0,
            elapsed: Duration::from_micros(812_345),
            config: PlayConfig {
                speed: Duration::from_millis(200),
                initial_sequence: None,
                echo_events: false,
            },
        }
    }

    #[test]
    fn summarizes_run() {
        let summary = build_text_summary(&report("R U R' U'"));
        assert_eq!(
            summary.lines,
            vec![
                "Moves: R U R' U'",
                "Tokens: 4  Rotations: 4  Failed: 0",
                "Speed: 200ms per turn",
                "Elapsed: 812ms",
                "Finished: 2026-01-01T00:00:00Z",
            ]
        );
    }

    #[test]
    fn empty_line() {
        let summary = build_text_summary(&report(""));
        assert_eq!(summary.lines[0], "Moves: (none)");
    }
}
