use serde::Serialize;

use crate::models::activity::Activity;

/// Aggregate totals and derived averages for one set of activities.
///
/// Total over any input, including the empty set: sums default to zero and
/// averages divide by `max(1, count)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityMetrics {
    pub activity_count: u64,
    pub total_duration_minutes: f64,
    pub total_duration_hours: f64,
    pub total_distance_km: f64,
    pub total_calories: i64,
    pub avg_duration: f64,
    pub avg_calories_per_activity: i64,
}

impl ActivityMetrics {
    pub fn from_activities<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        let mut count: u64 = 0;
        let mut total_duration = 0.0;
        let mut total_distance = 0.0;
        let mut total_calories: i64 = 0;
        for activity in activities {
            count += 1;
            total_duration += activity.duration_minutes;
            total_distance += activity.distance_km.unwrap_or(0.0);
            total_calories += i64::from(activity.calories_burned);
        }
        let divisor = count.max(1) as f64;

        Self {
            activity_count: count,
            total_duration_minutes: total_duration,
            total_duration_hours: round1(total_duration / 60.0),
            total_distance_km: total_distance,
            total_calories,
            avg_duration: round1(total_duration / divisor),
            avg_calories_per_activity: (total_calories as f64 / divisor).round() as i64,
        }
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testutil::activity;
    use crate::models::activity::ActivityType;

    #[test]
    fn empty_set_yields_all_zero_aggregates() {
        let metrics = ActivityMetrics::from_activities(&[]);
        assert_eq!(metrics.activity_count, 0);
        assert_eq!(metrics.total_duration_minutes, 0.0);
        assert_eq!(metrics.total_duration_hours, 0.0);
        assert_eq!(metrics.total_distance_km, 0.0);
        assert_eq!(metrics.total_calories, 0);
        assert_eq!(metrics.avg_duration, 0.0);
        assert_eq!(metrics.avg_calories_per_activity, 0);
    }

    #[test]
    fn count_matches_cardinality() {
        let one = vec![activity(ActivityType::Gym, 45.0, 200, "2024-03-01")];
        assert_eq!(ActivityMetrics::from_activities(&one).activity_count, 1);

        let many: Vec<_> = (0..17)
            .map(|_| activity(ActivityType::Run, 30.0, 300, "2024-03-02"))
            .collect();
        assert_eq!(ActivityMetrics::from_activities(&many).activity_count, 17);
    }

    #[test]
    fn two_runs_scenario() {
        let set = vec![
            activity(ActivityType::Run, 30.0, 300, "2024-01-01"),
            activity(ActivityType::Run, 60.0, 600, "2024-01-08"),
        ];
        let metrics = ActivityMetrics::from_activities(&set);
        assert_eq!(metrics.activity_count, 2);
        assert_eq!(metrics.total_duration_minutes, 90.0);
        assert_eq!(metrics.total_duration_hours, 1.5);
        assert_eq!(metrics.total_calories, 900);
        assert_eq!(metrics.avg_duration, 45.0);
        assert_eq!(metrics.avg_calories_per_activity, 450);
    }

    #[test]
    fn missing_distance_counts_as_zero() {
        let mut with_distance = activity(ActivityType::Run, 30.0, 300, "2024-01-01");
        with_distance.distance_km = Some(5.5);
        let without = activity(ActivityType::Gym, 60.0, 400, "2024-01-02");

        let metrics = ActivityMetrics::from_activities(&[with_distance, without]);
        assert_eq!(metrics.total_distance_km, 5.5);
    }

    #[test]
    fn averages_round_to_one_decimal_and_nearest_integer() {
        let set = vec![
            activity(ActivityType::Yoga, 20.0, 100, "2024-01-01"),
            activity(ActivityType::Yoga, 25.0, 101, "2024-01-02"),
            activity(ActivityType::Yoga, 25.0, 101, "2024-01-03"),
        ];
        let metrics = ActivityMetrics::from_activities(&set);
        // 70 / 3 = 23.33.. -> 23.3; 302 / 3 = 100.66.. -> 101
        assert_eq!(metrics.avg_duration, 23.3);
        assert_eq!(metrics.avg_calories_per_activity, 101);
    }
}
