use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::metrics::distribution::activity_distribution;
use crate::metrics::report::MetricsReport;
use crate::metrics::trends::Trends;
use crate::models::activity::Activity;
use crate::utils::jwt::claims_from_request;

async fn user_activities(req: &HttpRequest, pool: &PgPool) -> Result<Vec<Activity>, AppError> {
    let claims = claims_from_request(req)?;
    let user_id: Uuid = db::user_id_for_email(pool, &claims.sub).await?;
    db::fetch_user_activities(pool, user_id).await
}

// GET /v1/metrics
pub async fn get_metrics(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let activities = user_activities(&req, &pool).await?;
    let report = MetricsReport::compute(&activities, Utc::now());
    Ok(HttpResponse::Ok().json(report))
}

// GET /v1/metrics/trends
pub async fn get_trends(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let activities = user_activities(&req, &pool).await?;
    Ok(HttpResponse::Ok().json(Trends::from_activities(&activities)))
}

// GET /v1/metrics/distribution
pub async fn get_distribution(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let activities = user_activities(&req, &pool).await?;
    Ok(HttpResponse::Ok().json(activity_distribution(&activities)))
}
