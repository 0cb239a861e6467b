use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::DateFilterPolicy;
use crate::errors::AppError;
use crate::metrics::calculator::ActivityMetrics;
use crate::models::activity::{Activity, ActivityType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Date,
    Duration,
    CaloriesBurned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Parsed history filters. Date bounds stay raw strings here so the
/// configured invalid-date policy can decide between ignoring and rejecting.
#[derive(Debug, Clone)]
pub struct HistoryFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub activities: Vec<Activity>,
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
    pub summary: ActivityMetrics,
}

/// Filters, sorts, and paginates one user's activities. The summary covers
/// the filtered set before pagination.
pub fn run(
    activities: Vec<Activity>,
    filter: &HistoryFilter,
    policy: DateFilterPolicy,
) -> Result<HistoryPage, AppError> {
    let start = parse_date_bound(filter.start_date.as_deref(), "start_date", policy)?;
    let end = parse_date_bound(filter.end_date.as_deref(), "end_date", policy)?;
    let search = filter.search.as_ref().map(|s| s.to_lowercase());

    let mut filtered: Vec<Activity> = activities
        .into_iter()
        .filter(|a| {
            let day = a.date.date_naive();
            if start.is_some_and(|s| day < s) || end.is_some_and(|e| day > e) {
                return false;
            }
            if filter.activity_type.is_some_and(|t| a.activity_type != t) {
                return false;
            }
            if let Some(needle) = &search {
                return a
                    .notes
                    .as_ref()
                    .is_some_and(|n| n.to_lowercase().contains(needle));
            }
            true
        })
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match filter.sort_by {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Duration => a
                .duration_minutes
                .partial_cmp(&b.duration_minutes)
                .unwrap_or(std::cmp::Ordering::Equal),
            SortField::CaloriesBurned => a.calories_burned.cmp(&b.calories_burned),
        };
        match filter.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let summary = ActivityMetrics::from_activities(&filtered);
    let total = filtered.len() as u64;
    let page: Vec<Activity> = filtered
        .into_iter()
        .skip(filter.offset)
        .take(filter.limit)
        .collect();

    Ok(HistoryPage {
        activities: page,
        total,
        limit: filter.limit,
        offset: filter.offset,
        summary,
    })
}

fn parse_date_bound(
    raw: Option<&str>,
    name: &str,
    policy: DateFilterPolicy,
) -> Result<Option<NaiveDate>, AppError> {
    let Some(raw) = raw else { return Ok(None) };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => match policy {
            DateFilterPolicy::Ignore => {
                warn!("ignoring unparseable {} filter: {:?}", name, raw);
                Ok(None)
            }
            DateFilterPolicy::Reject => Err(AppError::BadRequest(format!(
                "Invalid {}: expected YYYY-MM-DD",
                name
            ))),
        },
    }
}
