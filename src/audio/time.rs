use std::time::Duration;

/// Format seconds as `m:ss`, flooring to whole seconds.
///
/// Negative and non-finite inputs render as `0:00`.
pub fn format_time(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}
