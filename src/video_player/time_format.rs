// SPDX-License-Identifier: MPL-2.0
//! Elapsed-time display formatting.

/// Formats elapsed seconds as `MM:SS`, or `H:MM:SS` from one hour on.
///
/// Fractional seconds are truncated. Negative and non-finite input is
/// treated as zero.
///
/// # Examples
///
/// ```
/// use reel_player::video_player::format_time;
///
/// assert_eq!(format_time(0.0), "00:00");
/// assert_eq!(format_time(75.9), "01:15");
/// assert_eq!(format_time(3661.0), "1:01:01");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
