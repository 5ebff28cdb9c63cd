use std::time::Duration;

/// Divisor for x100 fixed-point values.
const X100_DIVISOR: u64 = 100;

/// `<n>µs` under a millisecond, `<n>ms` under a second, `<s.t>s` above.
#[must_use]
pub fn format_latency(duration: Duration) -> String {
    if duration < Duration::from_millis(1) {
        format!("{}µs", duration.as_micros())
    } else if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

/// Renders an x100 fixed-point value as `int.frac`.
#[must_use]
pub fn format_x100(value: u64) -> String {
    let whole = value.checked_div(X100_DIVISOR).unwrap_or_default();
    let frac = value.checked_rem(X100_DIVISOR).unwrap_or_default();
    format!("{}.{:02}", whole, frac)
}

/// Like [`format_x100`] with an explicit sign.
#[must_use]
pub fn format_signed_x100(value: i64) -> String {
    let sign = if value < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_x100(value.unsigned_abs()))
}

/// Cuts `value` to `keep` chars plus `...` when it exceeds `limit` chars.
pub(super) fn truncate_chars(value: &str, limit: usize, keep: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_owned();
    }
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}
