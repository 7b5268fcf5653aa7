//! Milestone counters: time since each milestone and the next anniversary.

use chrono::{DateTime, Datelike, Duration, Utc};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Whole days and hours elapsed since `date`, never negative.
#[must_use]
pub fn elapsed_since(date: DateTime<Utc>, now: DateTime<Utc>) -> (i64, i64) {
    let ms = mutu_core::clock::elapsed_ms(date, now);
    (ms / DAY_MS, ms / HOUR_MS)
}

/// Moves `date` into `year`. A 29 February lands on 1 March in common years.
fn in_year(date: DateTime<Utc>, year: i32) -> DateTime<Utc> {
    date.with_year(year).unwrap_or_else(|| {
        (date - Duration::days(1))
            .with_year(year)
            .map_or(date, |eve| eve + Duration::days(1))
    })
}

/// The next recurrence of `date` strictly after `now`, and the whole days
/// until it, rounded up.
#[must_use]
pub fn next_anniversary(date: DateTime<Utc>, now: DateTime<Utc>) -> (DateTime<Utc>, i64) {
    let mut next = in_year(date, now.year());
    if next <= now {
        next = in_year(date, now.year() + 1);
    }
    let ms = (next - now).num_milliseconds().max(0);
    let days = (ms + DAY_MS - 1) / DAY_MS;
    (next, days)
}
