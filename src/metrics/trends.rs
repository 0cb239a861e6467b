use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::metrics::calculator::ActivityMetrics;
use crate::models::activity::{Activity, ActivityType};

/// One bucket of a trend series, keyed by its truncated start date.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    #[serde(flatten)]
    pub metrics: ActivityMetrics,
}

/// Weekly and monthly trend series over one user's activities.
///
/// Series are sparse: only buckets containing at least one activity appear.
/// Callers needing a dense series must fill gaps themselves.
#[derive(Debug, Clone, Serialize)]
pub struct Trends {
    pub weekly: Vec<TrendPoint>,
    pub monthly: Vec<TrendPoint>,
    pub by_activity_type: BTreeMap<ActivityType, Vec<TrendPoint>>,
}

impl Trends {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut by_activity_type = BTreeMap::new();
        for activity in activities {
            by_activity_type
                .entry(activity.activity_type)
                .or_insert_with(Vec::new);
        }
        for (activity_type, series) in &mut by_activity_type {
            let subset = activities.iter().filter(|a| a.activity_type == *activity_type);
            *series = bucket_series(subset, month_start);
        }

        Self {
            weekly: bucket_series(activities.iter(), week_start),
            monthly: bucket_series(activities.iter(), month_start),
            by_activity_type,
        }
    }
}

/// Groups activities into buckets by a date-truncation function and computes
/// metrics per bucket, ascending by bucket start.
fn bucket_series<'a, I>(activities: I, truncate: fn(NaiveDate) -> NaiveDate) -> Vec<TrendPoint>
where
    I: Iterator<Item = &'a Activity>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        buckets
            .entry(truncate(activity.date.date_naive()))
            .or_default()
            .push(activity);
    }
    buckets
        .into_iter()
        .map(|(period, members)| TrendPoint {
            period,
            metrics: ActivityMetrics::from_activities(members.iter().copied()),
        })
        .collect()
}

/// Monday of the ISO week containing `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testutil::activity;

    #[test]
    fn two_runs_fall_into_two_iso_weeks() {
        let set = vec![
            activity(ActivityType::Run, 30.0, 300, "2024-01-01"),
            activity(ActivityType::Run, 60.0, 600, "2024-01-08"),
        ];
        let trends = Trends::from_activities(&set);

        assert_eq!(trends.weekly.len(), 2);
        assert_eq!(trends.weekly[0].period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(trends.weekly[1].period, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(trends.weekly[0].metrics.activity_count, 1);
        assert_eq!(trends.weekly[1].metrics.activity_count, 1);
    }

    #[test]
    fn weeks_truncate_to_monday() {
        // 2024-03-09 is a Saturday; its ISO week starts 2024-03-04.
        let set = vec![activity(ActivityType::Swim, 40.0, 350, "2024-03-09")];
        let trends = Trends::from_activities(&set);
        assert_eq!(trends.weekly[0].period, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn monthly_series_is_sparse() {
        let set = vec![
            activity(ActivityType::Bike, 50.0, 500, "2024-01-10"),
            activity(ActivityType::Bike, 50.0, 500, "2024-04-10"),
        ];
        let trends = Trends::from_activities(&set);

        let months: Vec<NaiveDate> = trends.monthly.iter().map(|p| p.period).collect();
        assert_eq!(
            months,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            ]
        );
        // February and March produced no bucket at all.
        assert_eq!(trends.monthly.len(), 2);
    }

    #[test]
    fn same_month_activities_merge_into_one_bucket() {
        let set = vec![
            activity(ActivityType::Hiit, 20.0, 250, "2024-05-03"),
            activity(ActivityType::Hiit, 25.0, 300, "2024-05-28"),
        ];
        let trends = Trends::from_activities(&set);
        assert_eq!(trends.monthly.len(), 1);
        assert_eq!(trends.monthly[0].metrics.activity_count, 2);
        assert_eq!(trends.monthly[0].metrics.total_calories, 550);
    }

    #[test]
    fn per_type_series_only_counts_that_type() {
        let set = vec![
            activity(ActivityType::Run, 30.0, 300, "2024-02-01"),
            activity(ActivityType::Run, 30.0, 300, "2024-02-15"),
            activity(ActivityType::Yoga, 60.0, 150, "2024-02-20"),
        ];
        let trends = Trends::from_activities(&set);

        assert_eq!(trends.by_activity_type.len(), 2);
        let runs = &trends.by_activity_type[&ActivityType::Run];
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].metrics.activity_count, 2);
        let yoga = &trends.by_activity_type[&ActivityType::Yoga];
        assert_eq!(yoga[0].metrics.activity_count, 1);
    }

    #[test]
    fn empty_input_produces_empty_series() {
        let trends = Trends::from_activities(&[]);
        assert!(trends.weekly.is_empty());
        assert!(trends.monthly.is_empty());
        assert!(trends.by_activity_type.is_empty());
    }
}
