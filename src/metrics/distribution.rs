use serde::Serialize;
use std::collections::BTreeMap;

use crate::metrics::calculator::round1;
use crate::models::activity::{Activity, ActivityType};

/// Per-type aggregate breakdown of an activity set.
#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdown {
    pub activity_type: ActivityType,
    pub count: u64,
    pub total_duration: f64,
    pub total_calories: i64,
    pub avg_duration: f64,
    pub avg_calories: i64,
}

/// Groups activities by type, most frequent first. Ties on count are broken
/// by type code ascending so the order is deterministic.
pub fn activity_distribution(activities: &[Activity]) -> Vec<TypeBreakdown> {
    let mut groups: BTreeMap<ActivityType, (u64, f64, i64)> = BTreeMap::new();
    for activity in activities {
        let entry = groups.entry(activity.activity_type).or_insert((0, 0.0, 0));
        entry.0 += 1;
        entry.1 += activity.duration_minutes;
        entry.2 += i64::from(activity.calories_burned);
    }

    let mut breakdown: Vec<TypeBreakdown> = groups
        .into_iter()
        .map(|(activity_type, (count, total_duration, total_calories))| {
            let divisor = count.max(1) as f64;
            TypeBreakdown {
                activity_type,
                count,
                total_duration,
                total_calories,
                avg_duration: round1(total_duration / divisor),
                avg_calories: (total_calories as f64 / divisor).round() as i64,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.activity_type.as_str().cmp(b.activity_type.as_str()))
    });
    breakdown
}
