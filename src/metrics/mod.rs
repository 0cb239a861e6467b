pub mod calculator;
pub mod distribution;
pub mod history;
pub mod report;
pub mod trends;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::models::activity::{Activity, ActivityType};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    /// Builds an activity dated at noon UTC on the given `YYYY-MM-DD` day.
    pub fn activity(
        activity_type: ActivityType,
        duration_minutes: f64,
        calories_burned: i32,
        date: &str,
    ) -> Activity {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let ts = Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap());
        Activity {
            activity_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            activity_type,
            duration_minutes,
            distance_km: None,
            calories_burned,
            date: ts,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }
}
