//! Wall-clock access and the cached "current day".
//!
//! Dose times are local wall-clock values, so the clock hands out
//! `NaiveDateTime` in the host's local time. Tests and the CLI's pinned-clock
//! mode use [`FixedClock`].

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Maximum age of a cached current day before it is recomputed.
pub const TODAY_CACHE_TTL_SECONDS: i64 = 60;

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Caches the current calendar date.
///
/// The cached date may be stale by up to [`TODAY_CACHE_TTL_SECONDS`]; display
/// granularity is minutes so this never shows.
#[derive(Debug, Clone, Default)]
pub struct TodayCache {
    cached: Option<(NaiveDate, NaiveDateTime)>,
}

impl TodayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return today's date as seen at `now`, refreshing the cache if it is
    /// older than the TTL (or if the clock moved backwards).
    pub fn today(&mut self, now: NaiveDateTime) -> NaiveDate {
        if let Some((date, refreshed_at)) = self.cached {
            let age = now - refreshed_at;
            if age >= Duration::zero() && age <= Duration::seconds(TODAY_CACHE_TTL_SECONDS) {
                return date;
            }
        }
        let date = now.date();
        self.cached = Some((date, now));
        date
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_fixed_clock() {
        let instant = at("2025-06-08", "09:00:00");
        assert_eq!(FixedClock(instant).now(), instant);
    }

    #[test]
    fn test_today_cache_stays_stale_within_ttl() {
        let mut cache = TodayCache::new();
        assert_eq!(
            cache.today(at("2025-06-08", "23:59:30")),
            NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()
        );
        // 40 seconds later the day has rolled over, but the cache is still fresh.
        assert_eq!(
            cache.today(at("2025-06-09", "00:00:10")),
            NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()
        );
    }

    #[test]
    fn test_today_cache_refreshes_after_ttl() {
        let mut cache = TodayCache::new();
        cache.today(at("2025-06-08", "23:59:00"));
        assert_eq!(
            cache.today(at("2025-06-09", "00:00:01")),
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
    }

    #[test]
    fn test_today_cache_refreshes_when_clock_goes_back() {
        let mut cache = TodayCache::new();
        cache.today(at("2025-06-09", "00:00:10"));
        assert_eq!(
            cache.today(at("2025-06-08", "23:59:50")),
            NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()
        );
    }
}
