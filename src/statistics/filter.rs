//! Report period selection
//!
//! Periods are calendar ranges in the viewer's time zone: a range starts
//! at local midnight of its first day and ends at 23:59:59.999 of its last
//! day. Weeks start on Sunday.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Predefined or custom report period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    #[default]
    Today,
    Yesterday,
    ThisWeek,
    PreviousWeek,
    ThisMonth,
    PreviousMonth,
    Custom,
}

impl Period {
    /// Every period, in picker order
    pub const ALL: [Period; 7] = [
        Period::Today,
        Period::Yesterday,
        Period::ThisWeek,
        Period::PreviousWeek,
        Period::ThisMonth,
        Period::PreviousMonth,
        Period::Custom,
    ];

    pub fn label_key(self) -> &'static str {
        match self {
            Period::Today => "reportToday",
            Period::Yesterday => "reportYesterday",
            Period::ThisWeek => "reportThisWeek",
            Period::PreviousWeek => "reportPreviousWeek",
            Period::ThisMonth => "reportThisMonth",
            Period::PreviousMonth => "reportPreviousMonth",
            Period::Custom => "reportCustom",
        }
    }

    /// First and last calendar day of the period containing `today`;
    /// `None` for [`Period::Custom`]
    pub fn days(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        let month_start = first_of_month(today);

        let days = match self {
            Period::Today => (today, today),
            Period::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            Period::ThisWeek => (week_start, week_start + Duration::days(6)),
            Period::PreviousWeek => {
                let start = week_start - Duration::days(7);
                (start, start + Duration::days(6))
            }
            Period::ThisMonth => (month_start, last_of_month(month_start)),
            Period::PreviousMonth => {
                let end = month_start - Duration::days(1);
                (first_of_month(end), end)
            }
            Period::Custom => return None,
        };
        Some(days)
    }

    /// UTC range of the period as seen from `now`'s time zone
    pub fn resolve<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (first, last) = self.days(now.date_naive())?;
        day_range(&now.timezone(), first, last)
    }
}

/// UTC range of a user-picked span of days; `None` when `from` is after `to`
pub fn custom_range<Tz: TimeZone>(
    tz: &Tz,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if from > to {
        return None;
    }
    day_range(tz, from, to)
}

/// Query parameters for `/api/statistics`
pub fn statistics_query(from: DateTime<Utc>, to: DateTime<Utc>) -> [(&'static str, String); 2] {
    [
        ("from", from.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ("to", to.to_rfc3339_opts(SecondsFormat::Millis, true)),
    ]
}

fn day_range<Tz: TimeZone>(
    tz: &Tz,
    first: NaiveDate,
    last: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first.and_hms_opt(0, 0, 0)?;
    let end = last.and_hms_milli_opt(23, 59, 59, 999)?;
    Some((to_utc(tz, start), to_utc(tz, end)))
}

fn to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    // Midnight can fall into a DST gap; the next hour always exists
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.day0()))
}

fn last_of_month(month_start: NaiveDate) -> NaiveDate {
    let next_month = first_of_month(month_start + Duration::days(32));
    next_month - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2024, 5, 15)
    }

    #[test]
    fn test_period_days() {
        assert_eq!(Period::Today.days(today()), Some((today(), today())));
        assert_eq!(Period::Yesterday.days(today()), Some((date(2024, 5, 14), date(2024, 5, 14))));
        assert_eq!(Period::ThisWeek.days(today()), Some((date(2024, 5, 12), date(2024, 5, 18))));
        assert_eq!(Period::PreviousWeek.days(today()), Some((date(2024, 5, 5), date(2024, 5, 11))));
        assert_eq!(Period::ThisMonth.days(today()), Some((date(2024, 5, 1), date(2024, 5, 31))));
        assert_eq!(Period::PreviousMonth.days(today()), Some((date(2024, 4, 1), date(2024, 4, 30))));
        assert_eq!(Period::Custom.days(today()), None);
    }

    #[test]
    fn test_month_edges() {
        assert_eq!(Period::ThisMonth.days(date(2024, 2, 29)), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(Period::PreviousMonth.days(date(2024, 1, 3)), Some((date(2023, 12, 1), date(2023, 12, 31))));
        assert_eq!(Period::ThisMonth.days(date(2023, 12, 31)), Some((date(2023, 12, 1), date(2023, 12, 31))));
    }

    #[test]
    fn test_sunday_starts_its_own_week() {
        let sunday = date(2024, 5, 12);
        assert_eq!(Period::ThisWeek.days(sunday), Some((sunday, date(2024, 5, 18))));
    }

    #[test]
    fn test_resolve_in_utc() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let (from, to) = Period::Today.resolve(&now).unwrap();
        let [(_, from), (_, to)] = statistics_query(from, to);
        assert_eq!(from, "2024-05-15T00:00:00.000Z");
        assert_eq!(to, "2024-05-15T23:59:59.999Z");
    }

    #[test]
    fn test_resolve_honors_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 15, 1, 0, 0).unwrap();
        let (from, _) = Period::Today.resolve(&now).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 5, 14, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_custom_range() {
        assert!(custom_range(&Utc, date(2024, 5, 2), date(2024, 5, 1)).is_none());

        let (from, to) = custom_range(&Utc, date(2024, 5, 1), date(2024, 5, 2)).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert!(to > Utc.with_ymd_and_hms(2024, 5, 2, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_period_serde_names() {
        assert_eq!(serde_json::to_string(&Period::PreviousWeek).unwrap(), "\"previousWeek\"");
        let period: Period = serde_json::from_str("\"thisMonth\"").unwrap();
        assert_eq!(period, Period::ThisMonth);
    }
}
