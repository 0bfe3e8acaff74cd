use chrono::{DateTime, Months, SecondsFormat, Utc};

/// A half-open [from, to) interval bounding one query to the GitHub API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    /// The lower bound in the timestamp format the GitHub API expects.
    pub fn rfc3339_from(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// The upper bound in the timestamp format the GitHub API expects.
    pub fn rfc3339_to(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Produces `count` consecutive one-year windows anchored at `now`, most
/// recent first: window `i` covers [now - (i+1) years, now - i years).
pub fn year_windows(now: DateTime<Utc>, count: u32) -> Vec<TimeWindow> {
    (0..count)
        .map(|i| TimeWindow {
            from: shift_years_back(now, i + 1),
            to: shift_years_back(now, i),
        })
        .collect()
}

fn shift_years_back(instant: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    // Month arithmetic clamps day-of-month at the target month's end
    // (Feb 29 minus a year lands on Feb 28).
    instant
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_five_windows_chain_back_from_now() {
        let now = noon(2024, 6, 15);
        let windows = year_windows(now, 5);

        assert_eq!(windows.len(), 5);
        assert_eq!(windows[0].to, now);
        assert_eq!(windows[4].from, noon(2019, 6, 15));

        for window in &windows {
            assert!(window.from < window.to);
        }

        // Each window's upper bound is the previous (more recent) window's
        // lower bound, so the chain is contiguous and non-overlapping.
        for pair in windows.windows(2) {
            assert_eq!(pair[1].to, pair[0].from);
        }
    }

    #[test]
    fn test_windows_do_not_overlap() {
        let windows = year_windows(noon(2024, 6, 15), 5);

        for (i, a) in windows.iter().enumerate() {
            for b in windows.iter().skip(i + 1) {
                assert!(b.to <= a.from || a.to <= b.from);
            }
        }
    }

    #[test]
    fn test_leap_day_anchor_stays_ordered() {
        let now = noon(2024, 2, 29);
        let windows = year_windows(now, 5);

        for window in &windows {
            assert!(window.from < window.to);
        }
        // 2023 has no Feb 29; the boundary clamps to Feb 28.
        assert_eq!(windows[0].from, noon(2023, 2, 28));
    }

    #[test]
    fn test_rfc3339_serialization_uses_utc_designator() {
        let windows = year_windows(noon(2024, 6, 15), 1);

        assert_eq!(windows[0].rfc3339_from(), "2023-06-15T12:00:00Z");
        assert_eq!(windows[0].rfc3339_to(), "2024-06-15T12:00:00Z");
    }
}
