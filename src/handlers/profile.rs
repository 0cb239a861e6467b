use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::handlers::double_option;
use crate::models::user::User;
use crate::utils::jwt::claims_from_request;

#[derive(Deserialize)]
pub struct ProfileUpdate {
    // Double Option so that an explicit `"name": null` clears the field
    // while an absent key keeps the stored value.
    #[serde(default, deserialize_with = "double_option")]
    name: Option<Option<String>>,
}

#[derive(Serialize)]
struct ProfileResponse {
    user_id: Uuid,
    email: String,
    name: Option<String>,
}

async fn fetch_user(pool: &PgPool, email: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "SELECT user_id, email, password, name, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// GET /v1/user
pub async fn get_profile(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let claims = claims_from_request(&req)?;
    let user = fetch_user(&pool, &claims.sub).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user_id: user.user_id,
        email: user.email,
        name: user.name,
    }))
}

// PATCH /v1/user
pub async fn update_profile(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    updates: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let claims = claims_from_request(&req)?;
    let mut user = fetch_user(&pool, &claims.sub).await?;

    if let Some(name) = updates.into_inner().name {
        if let Some(name) = &name {
            if name.len() < 2 || name.len() > 60 {
                return Err(AppError::BadRequest(
                    "Name must be between 2 and 60 characters".to_string(),
                ));
            }
        }
        user.name = name;
    }

    let now = Utc::now();
    sqlx::query("UPDATE users SET name = $1, updated_at = $2 WHERE user_id = $3")
        .bind(&user.name)
        .bind(now)
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user_id: user.user_id,
        email: user.email,
        name: user.name,
    }))
}

// DELETE /v1/user
//
// Removing the user row cascades to all of their activities.
pub async fn delete_profile(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let claims = claims_from_request(&req)?;
    let user = fetch_user(&pool, &claims.sub).await?;

    sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_null_name_clears_absent_name_keeps() {
        let cleared: ProfileUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(cleared.name, Some(None));

        let kept: ProfileUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(kept.name, None);

        let set: ProfileUpdate = serde_json::from_str(r#"{"name": "Alex"}"#).unwrap();
        assert_eq!(set.name, Some(Some("Alex".to_string())));
    }
}
