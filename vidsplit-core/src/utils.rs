//! Time formatting helpers used by logs, the CLI, and progress reporting.

/// Format a timestamp as `H:MM:SS.t` with tenth-of-a-second precision.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    let tenths = ((seconds - seconds.floor()) * 10.0) as u64;
    format!("{hours}:{minutes:02}:{secs:02}.{tenths}")
}

/// Format a timestamp compactly, omitting leading zero components.
///
/// `95.5` stays `1:35.5`, `3725.0` becomes `1:02:05.0`, short values are
/// rendered as bare seconds (`9.9`).
pub fn format_timestamp_compact(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:04.1}")
    } else if minutes > 0 {
        format!("{minutes}:{secs:04.1}")
    } else {
        format!("{secs:.1}")
    }
}

/// Format a duration as `1h 2m 3.5s`, dropping leading components that are
/// zero (minutes are still shown whenever hours are).
pub fn format_duration_secs(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || hours > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{secs:.1}s"));
    parts.join(" ")
}
