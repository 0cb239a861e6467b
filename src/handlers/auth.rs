use actix_web::rt::task::spawn_blocking;
use actix_web::{web, HttpResponse};
use bcrypt::{hash, verify};
use lazy_static::lazy_static;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::user::GetUserPassword;
use crate::utils::jwt::generate_token;
use crate::utils::validation::validate_payload;

lazy_static! {
    // Short-circuits repeated registrations for an email we already know
    // exists, skipping the bcrypt hash and the insert round-trip.
    static ref EMAIL_CACHE: Cache<String, bool> = Cache::new(10_000);
}

#[derive(Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 32, message = "Password must be between 8 and 32 characters"))]
    password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    email: String,
    token: String,
}

// POST /v1/login
pub async fn login(
    req: web::Json<AuthRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let user = sqlx::query_as::<_, GetUserPassword>("SELECT password FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".to_string()))?;

    let password = req.password.clone();
    let is_valid = spawn_blocking(move || verify(password.as_str(), &user.password))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let email = req.email.clone();
    let token = spawn_blocking(move || generate_token(&email))
        .await
        .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))?
        .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        email: req.email.clone(),
        token,
    }))
}

// POST /v1/register
pub async fn register(
    req: web::Json<AuthRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    if EMAIL_CACHE.get(&req.email).is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password = req.password.clone();
    let password_hash = spawn_blocking(move || hash(&password, 10))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let user_id = uuid::Uuid::now_v7();
    let result = sqlx::query(
        "INSERT INTO users (user_id, email, password, created_at, updated_at) \
         VALUES ($1, $2, $3, NOW(), NOW()) \
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(user_id)
    .bind(&req.email)
    .bind(&password_hash)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        EMAIL_CACHE.insert(req.email.clone(), true);
        return Err(AppError::Conflict("Email already exists".to_string()));
    }
    EMAIL_CACHE.insert(req.email.clone(), true);

    let email = req.email.clone();
    let token = spawn_blocking(move || generate_token(&email))
        .await
        .map_err(|_| AppError::InternalServerError("Token generation failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        email: req.email.clone(),
        token,
    }))
}
