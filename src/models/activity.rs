use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Canonical activity type codes. Stored as TEXT in Postgres and used as
/// wire strings in requests and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    Run,
    Swim,
    Bike,
    Gym,
    #[serde(rename = "WLK")]
    Walk,
    Hiit,
    Yoga,
}

impl ActivityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "RUN",
            Self::Swim => "SWIM",
            Self::Bike => "BIKE",
            Self::Gym => "GYM",
            Self::Walk => "WLK",
            Self::Hiit => "HIIT",
            Self::Yoga => "YOGA",
        }
    }

    /// Types for which a distance is mandatory on create/update.
    pub const fn is_distance_based(self) -> bool {
        matches!(self, Self::Run | Self::Swim | Self::Bike | Self::Walk)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct InvalidActivityType(pub String);

impl fmt::Display for InvalidActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid activity type: {}", self.0)
    }
}

impl std::error::Error for InvalidActivityType {}

impl TryFrom<String> for ActivityType {
    type Error = InvalidActivityType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "RUN" => Ok(Self::Run),
            "SWIM" => Ok(Self::Swim),
            "BIKE" => Ok(Self::Bike),
            "GYM" => Ok(Self::Gym),
            "WLK" => Ok(Self::Walk),
            "HIIT" => Ok(Self::Hiit),
            "YOGA" => Ok(Self::Yoga),
            _ => Err(InvalidActivityType(value)),
        }
    }
}

/// One logged exercise session. Owned by exactly one user; `user_id` is
/// immutable after creation and every read path filters on it.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Activity {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub activity_type: ActivityType,
    pub duration_minutes: f64,
    pub distance_km: Option<f64>,
    pub calories_burned: i32,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
