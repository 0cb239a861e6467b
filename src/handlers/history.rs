use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db;
use crate::errors::AppError;
use crate::metrics::history::{self, HistoryFilter, SortField, SortOrder};
use crate::models::activity::ActivityType;
use crate::utils::jwt::claims_from_request;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct HistoryQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    activity_type: Option<ActivityType>,
    search: Option<String>,
    sort_by: Option<SortField>,
    order: Option<SortOrder>,
    limit: Option<usize>,
    offset: Option<usize>,
}

// GET /v1/activities
pub async fn get_history(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let claims = claims_from_request(&req)?;
    let user_id = db::user_id_for_email(&pool, &claims.sub).await?;

    let query = query.into_inner();
    let filter = HistoryFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        activity_type: query.activity_type,
        search: query.search,
        sort_by: query.sort_by.unwrap_or(SortField::Date),
        order: query.order.unwrap_or(SortOrder::Desc),
        limit: query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        offset: query.offset.unwrap_or(0),
    };

    let activities = db::fetch_user_activities(&pool, user_id).await?;
    let page = history::run(activities, &filter, config.date_filter_policy)?;

    Ok(HttpResponse::Ok().json(page))
}
