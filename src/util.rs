/// `m:ss` clock used by the memorize screen; minutes are not capped
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Elapsed typing time with one decimal, e.g. `12.3s`
pub fn format_elapsed(secs: f64) -> String {
    format!("{secs:.1}s")
}

/// Whole percentage for a `[0, 1]` fraction, clamped
pub fn percent(fraction: f64) -> u16 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u16
}
