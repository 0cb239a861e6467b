use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::Activity;
use crate::models::user::GetUserId;

// Every statement touching activities carries the owner's user_id, so a
// guessed or injected activity id can never reach another user's rows.
const SELECT_USER_ID: &str = "SELECT user_id FROM users WHERE email = $1";

const SELECT_USER_ACTIVITIES: &str =
    "SELECT activity_id, user_id, activity_type, duration_minutes, distance_km, \
     calories_burned, date, notes, created_at, updated_at \
     FROM activities WHERE user_id = $1 ORDER BY date DESC";

const SELECT_ACTIVITY: &str =
    "SELECT activity_id, user_id, activity_type, duration_minutes, distance_km, \
     calories_burned, date, notes, created_at, updated_at \
     FROM activities WHERE activity_id = $1 AND user_id = $2";

const INSERT_ACTIVITY: &str =
    "INSERT INTO activities (activity_id, user_id, activity_type, duration_minutes, \
     distance_km, calories_burned, date, notes, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

const UPDATE_ACTIVITY: &str =
    "UPDATE activities SET activity_type = $1, duration_minutes = $2, distance_km = $3, \
     calories_burned = $4, date = $5, notes = $6, updated_at = $7 \
     WHERE activity_id = $8 AND user_id = $9";

const DELETE_ACTIVITY: &str = "DELETE FROM activities WHERE activity_id = $1 AND user_id = $2";

/// Resolves the authenticated email to its user id.
pub async fn user_id_for_email(pool: &PgPool, email: &str) -> Result<Uuid, AppError> {
    let user = sqlx::query_as::<_, GetUserId>(SELECT_USER_ID)
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(user.user_id)
}

/// Materializes the user's full activity set. All aggregation runs in-process
/// over this set; nothing is aggregated in SQL.
pub async fn fetch_user_activities(pool: &PgPool, user_id: Uuid) -> Result<Vec<Activity>, AppError> {
    let activities = sqlx::query_as::<_, Activity>(SELECT_USER_ACTIVITIES)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(activities)
}

/// Owner-scoped lookup: another user's activity id yields `None`, never the row.
pub async fn fetch_activity(
    pool: &PgPool,
    user_id: Uuid,
    activity_id: Uuid,
) -> Result<Option<Activity>, AppError> {
    let activity = sqlx::query_as::<_, Activity>(SELECT_ACTIVITY)
        .bind(activity_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(activity)
}

pub async fn insert_activity(pool: &PgPool, activity: &Activity) -> Result<(), AppError> {
    sqlx::query(INSERT_ACTIVITY)
        .bind(activity.activity_id)
        .bind(activity.user_id)
        .bind(activity.activity_type.as_str())
        .bind(activity.duration_minutes)
        .bind(activity.distance_km)
        .bind(activity.calories_burned)
        .bind(activity.date)
        .bind(&activity.notes)
        .bind(activity.created_at)
        .bind(activity.updated_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_activity(pool: &PgPool, activity: &Activity) -> Result<(), AppError> {
    sqlx::query(UPDATE_ACTIVITY)
        .bind(activity.activity_type.as_str())
        .bind(activity.duration_minutes)
        .bind(activity.distance_km)
        .bind(activity.calories_burned)
        .bind(activity.date)
        .bind(&activity.notes)
        .bind(activity.updated_at)
        .bind(activity.activity_id)
        .bind(activity.user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the number of rows deleted (0 when the activity does not exist or
/// belongs to someone else).
pub async fn delete_activity(
    pool: &PgPool,
    user_id: Uuid,
    activity_id: Uuid,
) -> Result<u64, AppError> {
    let result = sqlx::query(DELETE_ACTIVITY)
        .bind(activity_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
