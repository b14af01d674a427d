use std::time::Duration;

/// Human readable form of a millisecond duration, e.g. `1s 500ms`
pub fn humanize_millis(millis: f64) -> String {
    let millis = if millis.is_finite() && millis > 0.0 {
        millis.round() as u64
    } else {
        0
    };
    humantime::format_duration(Duration::from_millis(millis)).to_string()
}
