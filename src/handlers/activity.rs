use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db;
use crate::errors::AppError;
use crate::handlers::double_option;
use crate::models::activity::{Activity, ActivityType};
use crate::utils::jwt::claims_from_request;
use crate::utils::validation::{validate_activity_rules, validate_payload};

#[derive(Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(required(message = "Activity type is required"))]
    activity_type: Option<ActivityType>,

    #[validate(required(message = "Duration is required"))]
    duration_minutes: Option<f64>,

    distance_km: Option<f64>,

    #[validate(required(message = "Calories burned is required"))]
    calories_burned: Option<i32>,

    // Defaults to submission time when omitted.
    date: Option<DateTime<Utc>>,

    notes: Option<String>,
}

/// Partial update: absent fields keep their stored values. The nullable
/// columns take a double Option so an explicit JSON `null` clears them.
#[derive(Deserialize)]
pub struct UpdateActivityRequest {
    activity_type: Option<ActivityType>,
    duration_minutes: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    distance_km: Option<Option<f64>>,
    calories_burned: Option<i32>,
    date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    notes: Option<Option<String>>,
}

fn apply_update(activity: &mut Activity, payload: UpdateActivityRequest) {
    if let Some(activity_type) = payload.activity_type {
        activity.activity_type = activity_type;
    }
    if let Some(duration_minutes) = payload.duration_minutes {
        activity.duration_minutes = duration_minutes;
    }
    if let Some(distance_km) = payload.distance_km {
        activity.distance_km = distance_km;
    }
    if let Some(calories_burned) = payload.calories_burned {
        activity.calories_burned = calories_burned;
    }
    if let Some(date) = payload.date {
        activity.date = date;
    }
    if let Some(notes) = payload.notes {
        activity.notes = notes;
    }
}

async fn resolve_user(req: &HttpRequest, pool: &PgPool) -> Result<Uuid, AppError> {
    let claims = claims_from_request(req)?;
    db::user_id_for_email(pool, &claims.sub).await
}

// POST /v1/activities
pub async fn create_activity(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    payload: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user_id = resolve_user(&req, &pool).await?;

    let payload = payload.into_inner();
    let activity_type = payload
        .activity_type
        .ok_or_else(|| AppError::BadRequest("Activity type is required".to_string()))?;
    let duration_minutes = payload
        .duration_minutes
        .ok_or_else(|| AppError::BadRequest("Duration is required".to_string()))?;
    let calories_burned = payload
        .calories_burned
        .ok_or_else(|| AppError::BadRequest("Calories burned is required".to_string()))?;

    validate_activity_rules(
        activity_type,
        duration_minutes,
        payload.distance_km,
        calories_burned,
    )?;

    let now = Utc::now();
    let activity = Activity {
        activity_id: Uuid::new_v4(),
        user_id,
        activity_type,
        duration_minutes,
        distance_km: payload.distance_km,
        calories_burned,
        date: payload.date.unwrap_or(now),
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };
    db::insert_activity(&pool, &activity).await?;

    Ok(HttpResponse::Created().json(activity))
}

// GET /v1/activities/{activity_id}
pub async fn get_activity(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    activity_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = resolve_user(&req, &pool).await?;

    let activity = db::fetch_activity(&pool, user_id, *activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(HttpResponse::Ok().json(activity))
}

// PATCH /v1/activities/{activity_id}
pub async fn update_activity(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    activity_id: web::Path<Uuid>,
    payload: web::Json<UpdateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = resolve_user(&req, &pool).await?;

    // Owner-scoped fetch; someone else's activity id is indistinguishable
    // from a missing one.
    let mut activity = db::fetch_activity(&pool, user_id, *activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    apply_update(&mut activity, payload.into_inner());

    validate_activity_rules(
        activity.activity_type,
        activity.duration_minutes,
        activity.distance_km,
        activity.calories_burned,
    )?;

    activity.updated_at = Utc::now();
    db::update_activity(&pool, &activity).await?;

    Ok(HttpResponse::Ok().json(activity))
}

// DELETE /v1/activities/{activity_id}
pub async fn delete_activity(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    activity_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = resolve_user(&req, &pool).await?;

    let deleted = db::delete_activity(&pool, user_id, *activity_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Activity deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testutil::activity;

    #[test]
    fn patch_null_clears_nullable_fields() {
        let mut stored = activity(ActivityType::Gym, 30.0, 200, "2024-01-01");
        stored.distance_km = Some(2.0);
        stored.notes = Some("treadmill".to_string());

        let payload: UpdateActivityRequest =
            serde_json::from_str(r#"{"distance_km": null, "notes": null}"#).unwrap();
        apply_update(&mut stored, payload);

        assert_eq!(stored.distance_km, None);
        assert_eq!(stored.notes, None);
    }

    #[test]
    fn patch_absent_fields_keep_stored_values() {
        let mut stored = activity(ActivityType::Run, 30.0, 300, "2024-01-01");
        stored.distance_km = Some(5.0);
        stored.notes = Some("easy pace".to_string());

        let payload: UpdateActivityRequest =
            serde_json::from_str(r#"{"duration_minutes": 45.0}"#).unwrap();
        apply_update(&mut stored, payload);

        assert_eq!(stored.duration_minutes, 45.0);
        assert_eq!(stored.distance_km, Some(5.0));
        assert_eq!(stored.notes, Some("easy pace".to_string()));
    }

    #[test]
    fn clearing_distance_on_distance_based_type_fails_validation() {
        let mut stored = activity(ActivityType::Run, 30.0, 300, "2024-01-01");
        stored.distance_km = Some(5.0);

        let payload: UpdateActivityRequest =
            serde_json::from_str(r#"{"distance_km": null}"#).unwrap();
        apply_update(&mut stored, payload);

        assert!(validate_activity_rules(
            stored.activity_type,
            stored.duration_minutes,
            stored.distance_km,
            stored.calories_burned,
        )
        .is_err());
    }
}
