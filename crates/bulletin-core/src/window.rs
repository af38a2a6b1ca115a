//! Calendar-aligned query windows.

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Default window length. Intervals that do not divide 24 still run, but the
/// windows will not line up with local day boundaries.
pub const DEFAULT_HOUR_INTERVAL: u32 = 24;

/// Source timezone the bulletin reports are anchored to.
pub const DEFAULT_TZ: Tz = chrono_tz::US::Eastern;

/// A half-open `[start, end)` query window in absolute UTC time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The literal timeframe string passed to the analytics service and
    /// stamped onto every result row. Millisecond precision, `Z` suffix.
    pub fn start_tag(&self) -> String {
        format_tag(self.start)
    }

    pub fn end_tag(&self) -> String {
        format_tag(self.end)
    }
}

fn format_tag(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Splits the inclusive local date range `[start, end]` into windows of
/// `hour_interval` hours, each paired with an end exactly 24 absolute hours
/// later, converted to UTC.
///
/// The range is extended by one day so the final calendar day is fully
/// covered, and the trailing sentinel window is dropped. An `end` before
/// `start` yields an empty sequence.
pub fn timeframes(
    start: NaiveDate,
    end: NaiveDate,
    hour_interval: u32,
    tz: Tz,
) -> Result<Vec<TimeWindow>> {
    if hour_interval == 0 {
        bail!("hour_interval must be positive");
    }

    let limit = (end + Duration::days(1)).and_time(NaiveTime::MIN);
    let mut cursor = start.and_time(NaiveTime::MIN);
    let mut windows = Vec::new();

    while cursor <= limit {
        // A local instant erased by a DST gap would silently skew every
        // window after it; refuse instead.
        let local = tz
            .from_local_datetime(&cursor)
            .earliest()
            .ok_or_else(|| anyhow!("local time {cursor} does not exist in {tz}"))?;
        let start_utc = local.with_timezone(&Utc);
        windows.push(TimeWindow {
            start: start_utc,
            end: start_utc + Duration::days(1),
        });
        cursor += Duration::hours(i64::from(hour_interval));
    }

    // The last instant is the boundary after the extended range, not a
    // window of its own.
    windows.pop();
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    #[test]
    fn single_day_yields_one_window() {
        let windows =
            timeframes(date("2017-08-04"), date("2017-08-04"), 24, DEFAULT_TZ).expect("windows");
        assert_eq!(windows.len(), 1);
        // Midnight US/Eastern during DST is 04:00 UTC.
        assert_eq!(windows[0].start_tag(), "2017-08-04T04:00:00.000Z");
        assert_eq!(windows[0].end_tag(), "2017-08-05T04:00:00.000Z");
    }

    #[test]
    fn window_count_is_days_times_hours_over_interval() {
        let windows =
            timeframes(date("2017-08-04"), date("2017-12-04"), 24, DEFAULT_TZ).expect("windows");
        let days = (date("2017-12-04") - date("2017-08-04")).num_days() + 1;
        assert_eq!(windows.len() as i64, days);

        let halves =
            timeframes(date("2017-08-04"), date("2017-08-05"), 12, DEFAULT_TZ).expect("windows");
        assert_eq!(halves.len(), 4);
    }

    #[test]
    fn windows_are_contiguous_at_daily_interval() {
        let windows =
            timeframes(date("2017-08-01"), date("2017-08-07"), 24, DEFAULT_TZ).expect("windows");
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(windows[0].start_tag(), "2017-08-01T04:00:00.000Z");
    }

    #[test]
    fn reversed_range_is_empty() {
        let windows =
            timeframes(date("2017-08-04"), date("2017-08-01"), 24, DEFAULT_TZ).expect("windows");
        assert!(windows.is_empty());
    }

    #[test]
    fn fall_dst_windows_keep_absolute_24h_spans() {
        // US/Eastern left DST on 2017-11-05; local midnights shift from
        // 04:00Z to 05:00Z. Every window still spans exactly 24 absolute
        // hours, so the transition day's end lands one hour before the next
        // start: the local 25-hour day is deliberately not stretched.
        let windows =
            timeframes(date("2017-11-04"), date("2017-11-06"), 24, DEFAULT_TZ).expect("windows");
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start_tag(), "2017-11-04T04:00:00.000Z");
        assert_eq!(windows[2].start_tag(), "2017-11-06T05:00:00.000Z");
        for window in &windows {
            assert_eq!(window.end - window.start, Duration::hours(24));
        }
        assert_eq!(windows[1].end_tag(), "2017-11-06T04:00:00.000Z");
        assert_eq!(windows[1].end + Duration::hours(1), windows[2].start);
    }

    #[test]
    fn spring_dst_gap_at_subdaily_interval_is_rejected() {
        // US/Eastern sprang forward on 2017-03-12: 02:00 local never
        // happened. A 2h interval steps onto it and must fail loudly.
        let err = timeframes(date("2017-03-11"), date("2017-03-12"), 2, DEFAULT_TZ)
            .expect_err("gap instant must be rejected");
        assert!(err.to_string().contains("does not exist"));

        // Daily windows anchor at midnight and never hit the gap.
        assert!(timeframes(date("2017-03-11"), date("2017-03-13"), 24, DEFAULT_TZ).is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(timeframes(date("2017-08-04"), date("2017-08-04"), 0, DEFAULT_TZ).is_err());
    }
}
