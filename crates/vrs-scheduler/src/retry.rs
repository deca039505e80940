//! Refresh decision for consecutive empty polling cycles.

/// Consecutive no-earlier-day cycles tolerated before forcing a page
/// reload. Reloading is a cheap way out of stale server-rendered
/// state without re-authenticating.
pub const REFRESH_THRESHOLD: u32 = 10;

/// True once `count` cycles in a row came up empty. The counter is
/// owned by the caller and reset on reload or fresh login.
pub fn should_refresh(count: u32) -> bool {
    count >= REFRESH_THRESHOLD
}
