use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
    AllTime,
}

/// Inclusive time range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

impl Period {
    pub const ALL: [Period; 4] = [Self::Weekly, Self::Monthly, Self::Yearly, Self::AllTime];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::AllTime => "alltime",
        }
    }

    /// Weekly is a rolling seven days; monthly and yearly run from the start
    /// of the current calendar month/year; all-time starts at the epoch.
    pub fn window(self, now: DateTime<Utc>) -> Window {
        let today = now.date_naive();
        let start = match self {
            Self::Weekly => now - Duration::days(7),
            Self::Monthly => (today - Days::new(u64::from(now.day0())))
                .and_time(NaiveTime::MIN)
                .and_utc(),
            Self::Yearly => (today - Days::new(u64::from(now.ordinal0())))
                .and_time(NaiveTime::MIN)
                .and_utc(),
            Self::AllTime => DateTime::<Utc>::UNIX_EPOCH,
        };

        Window { start, end: now }
    }

    pub fn label(self, now: DateTime<Utc>) -> String {
        match self {
            Self::Weekly => format!("Week of {}", self.window(now).start.format("%Y-%m-%d")),
            Self::Monthly => now.format("%b %Y").to_string(),
            Self::Yearly => now.format("%Y").to_string(),
            Self::AllTime => "All time".to_owned(),
        }
    }
}

impl FromStr for Period {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| ApiError::validation("period", format!("Unknown period: {s}")))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 5).unwrap()
    }

    #[test]
    fn weekly_window_is_rolling_seven_days() {
        let window = Period::Weekly.window(now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 12, 14, 30, 5).unwrap());
        assert_eq!(window.end, now());
    }

    #[test]
    fn monthly_and_yearly_start_at_calendar_boundaries() {
        assert_eq!(
            Period::Monthly.window(now()).start,
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Period::Yearly.window(now()).start,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(Period::AllTime.window(now()).start.timestamp(), 0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = Period::Monthly.window(now());
        assert!(window.contains(window.start));
        assert!(window.contains(now()));
        assert!(!window.contains(window.start - Duration::seconds(1)));
        assert!(!window.contains(now() + Duration::seconds(1)));
    }

    #[test]
    fn labels_name_the_period() {
        assert_eq!(Period::Weekly.label(now()), "Week of 2026-10-12");
        assert_eq!(Period::Monthly.label(now()), "Oct 2026");
        assert_eq!(Period::Yearly.label(now()), "2026");
        assert_eq!(Period::AllTime.label(now()), "All time");
        assert_eq!("alltime".parse::<Period>().unwrap(), Period::AllTime);
    }
}
