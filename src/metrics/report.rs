use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::metrics::calculator::ActivityMetrics;
use crate::metrics::distribution::{activity_distribution, TypeBreakdown};
use crate::metrics::trends::Trends;
use crate::models::activity::Activity;

/// Full metrics response: five rolling windows relative to `now`, plus
/// trends and the per-type distribution over the whole set.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub lifetime: ActivityMetrics,
    pub yearly: ActivityMetrics,
    pub monthly: ActivityMetrics,
    pub weekly: ActivityMetrics,
    pub daily: ActivityMetrics,
    pub trends: Trends,
    pub activity_distribution: Vec<TypeBreakdown>,
}

impl MetricsReport {
    /// Window lower bounds are inclusive on the calendar date; `daily` is an
    /// exact match on today's date, not a range.
    pub fn compute(activities: &[Activity], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let year_ago = today - Duration::days(365);
        let month_ago = today - Duration::days(30);
        let week_ago = today - Duration::days(7);

        Self {
            lifetime: ActivityMetrics::from_activities(activities),
            yearly: windowed(activities, |a| a.date.date_naive() >= year_ago),
            monthly: windowed(activities, |a| a.date.date_naive() >= month_ago),
            weekly: windowed(activities, |a| a.date.date_naive() >= week_ago),
            daily: windowed(activities, |a| a.date.date_naive() == today),
            trends: Trends::from_activities(activities),
            activity_distribution: activity_distribution(activities),
        }
    }
}

fn windowed(activities: &[Activity], in_window: impl Fn(&Activity) -> bool) -> ActivityMetrics {
    ActivityMetrics::from_activities(activities.iter().filter(|a| in_window(a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testutil::activity;
    use crate::models::activity::ActivityType;
    use chrono::TimeZone;

    fn at_noon(date: &str) -> DateTime<Utc> {
        let day = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
    }

    #[test]
    fn window_lower_bounds_are_inclusive() {
        // Exactly 7, 30, and 365 days before "now".
        let set = vec![
            activity(ActivityType::Run, 30.0, 300, "2024-06-08"),
            activity(ActivityType::Run, 30.0, 300, "2024-05-16"),
            activity(ActivityType::Run, 30.0, 300, "2023-06-16"),
        ];
        let report = MetricsReport::compute(&set, at_noon("2024-06-15"));

        assert_eq!(report.weekly.activity_count, 1);
        assert_eq!(report.monthly.activity_count, 2);
        assert_eq!(report.yearly.activity_count, 3);
        assert_eq!(report.lifetime.activity_count, 3);
    }

    #[test]
    fn daily_is_exact_date_match() {
        let set = vec![
            activity(ActivityType::Gym, 45.0, 200, "2024-06-15"),
            activity(ActivityType::Gym, 45.0, 200, "2024-06-14"),
        ];
        let report = MetricsReport::compute(&set, at_noon("2024-06-15"));
        assert_eq!(report.daily.activity_count, 1);
        assert_eq!(report.weekly.activity_count, 2);
    }

    #[test]
    fn old_activities_only_count_toward_lifetime() {
        let set = vec![activity(ActivityType::Swim, 60.0, 500, "2019-01-01")];
        let report = MetricsReport::compute(&set, at_noon("2024-06-15"));
        assert_eq!(report.lifetime.activity_count, 1);
        assert_eq!(report.yearly.activity_count, 0);
        assert_eq!(report.monthly.activity_count, 0);
        assert_eq!(report.weekly.activity_count, 0);
        assert_eq!(report.daily.activity_count, 0);
    }

    #[test]
    fn empty_set_report_is_all_zeroes() {
        let report = MetricsReport::compute(&[], Utc::now());
        assert_eq!(report.lifetime.activity_count, 0);
        assert_eq!(report.daily.activity_count, 0);
        assert!(report.trends.monthly.is_empty());
        assert!(report.activity_distribution.is_empty());
    }

    #[test]
    fn trends_and_distribution_cover_the_full_set() {
        let set = vec![
            activity(ActivityType::Run, 30.0, 300, "2023-01-10"),
            activity(ActivityType::Bike, 90.0, 700, "2024-06-10"),
        ];
        let report = MetricsReport::compute(&set, at_noon("2024-06-15"));

        // Trends include the out-of-window 2023 activity.
        assert_eq!(report.trends.monthly.len(), 2);
        let total: u64 = report.activity_distribution.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }
}
