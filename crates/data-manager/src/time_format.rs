//! Combines roster dates and times into calendar timestamps.
//! Values are local wall-clock strings; no timezone handling.

/// `date` alone when no time is given, `dateTHH:MM` otherwise
pub fn combine_timestamp(date: &str, time: Option<&str>) -> String {
    match time {
        Some(time) if !time.is_empty() => format!("{date}T{}", normalize_time(time)),
        _ => date.to_string(),
    }
}

/// Zero-pad `H:M` style times. Five-character times pass through unchanged.
fn normalize_time(time: &str) -> String {
    if time.chars().count() == 5 {
        return time.to_string();
    }

    let mut parts = time.split(':');
    let hour = parts.next().unwrap_or_default();
    let minute = parts.next().unwrap_or("00");

    format!("{}:{}", pad2(hour), pad2(minute))
}

fn pad2(part: &str) -> String {
    format!("{part:0>2}")
}
