//! Display formatting helpers

use crate::state::ClockValue;

/// Left-pad `s` with zeroes to exactly `n` characters. Longer strings are
/// returned unchanged.
pub fn fill_decimal_places(s: &str, n: usize) -> String {
    let len = s.chars().count();
    if len >= n {
        return s.to_string();
    }
    let mut padded = "0".repeat(n - len);
    padded.push_str(s);
    padded
}

/// Format a clock as `HH:MM:SS`; hours grow past two digits if needed
pub fn format_clock(clock: &ClockValue) -> String {
    format!(
        "{}:{}:{}",
        fill_decimal_places(&clock.hours().to_string(), 2),
        fill_decimal_places(&clock.minutes().to_string(), 2),
        fill_decimal_places(&clock.seconds().to_string(), 2),
    )
}
