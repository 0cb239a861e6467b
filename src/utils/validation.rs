use validator::Validate;

use crate::errors::AppError;
use crate::models::activity::ActivityType;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

/// Business rules checked before any write: positive duration, non-negative
/// calories, and a mandatory non-negative distance for distance-based types.
pub fn validate_activity_rules(
    activity_type: ActivityType,
    duration_minutes: f64,
    distance_km: Option<f64>,
    calories_burned: i32,
) -> Result<(), AppError> {
    if duration_minutes.is_nan() || duration_minutes <= 0.0 {
        return Err(AppError::BadRequest(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    if calories_burned < 0 {
        return Err(AppError::BadRequest(
            "Calories burned cannot be negative".to_string(),
        ));
    }
    match distance_km {
        Some(d) if d < 0.0 => Err(AppError::BadRequest(
            "Distance cannot be negative".to_string(),
        )),
        None if activity_type.is_distance_based() => Err(AppError::BadRequest(format!(
            "Distance is required for {}",
            activity_type
        ))),
        _ => Ok(()),
    }
}
