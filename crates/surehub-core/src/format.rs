// ── Human-friendly durations ──

/// Render a duration in seconds the way the mobile app does: only the
/// significant units, collapsing a stray minute next to a whole hour.
///
/// `30` → `"30sec"`, `90` → `"1min"`, `3700` → `"1h"`,
/// `7440` → `"2h 4m"`, `90000` → `"1d 1h 0m"`.
pub fn natural_time(duration: u64) -> String {
    let (hours, rem) = (duration / 3600, duration % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    if duration >= 86_400 {
        let (days, hours) = (hours / 24, hours % 24);
        format!("{days}d {hours}h {minutes}m")
    } else if duration >= 3600 {
        // A minute or two around the full hour reads as noise.
        if minutes < 2 || minutes > 58 {
            format!("{hours}h")
        } else {
            format!("{hours}h {minutes}m")
        }
    } else if duration > 60 {
        format!("{minutes}min")
    } else {
        format!("{seconds}sec")
    }
}
