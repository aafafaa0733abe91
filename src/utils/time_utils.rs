use chrono::DateTime;

/// Formats an epoch-seconds plot coordinate as an intraday axis label.
pub fn format_axis_time(epoch_secs: f64) -> String {
    DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Formats an epoch-milliseconds timestamp for status lines.
pub fn format_timestamp_ms(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("{timestamp_ms} ms"))
}
