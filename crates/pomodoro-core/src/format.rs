//! Readout formatting.

/// Zero-padded `MM:SS`. Minutes are not folded into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `MM:SS` below an hour, `HH:MM:SS` from an hour on. Used for totals that
/// can grow without bound, such as accumulated work time.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
