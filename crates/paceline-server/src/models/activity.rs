//! Activity rows, payloads and the list filter.

use chrono::{DateTime, Utc};
use paceline_db::{DbError, DbResult, FromRow, RowExt, validate};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use super::rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    Walking,
    Yoga,
    Stretching,
    Cycling,
    Swimming,
    Dancing,
    Hiking,
    Running,
    #[serde(rename = "HIIT")]
    Hiit,
    JumpRope,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Yoga => "Yoga",
            Self::Stretching => "Stretching",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Dancing => "Dancing",
            Self::Hiking => "Hiking",
            Self::Running => "Running",
            Self::Hiit => "HIIT",
            Self::JumpRope => "JumpRope",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Walking" => Some(Self::Walking),
            "Yoga" => Some(Self::Yoga),
            "Stretching" => Some(Self::Stretching),
            "Cycling" => Some(Self::Cycling),
            "Swimming" => Some(Self::Swimming),
            "Dancing" => Some(Self::Dancing),
            "Hiking" => Some(Self::Hiking),
            "Running" => Some(Self::Running),
            "HIIT" => Some(Self::Hiit),
            "JumpRope" => Some(Self::JumpRope),
            _ => None,
        }
    }

    /// Flat burn rate per minute, by intensity bracket.
    pub fn calories_per_minute(&self) -> i32 {
        match self {
            Self::Walking | Self::Yoga | Self::Stretching => 4,
            Self::Cycling | Self::Swimming | Self::Dancing => 8,
            Self::Hiking | Self::Running | Self::Hiit | Self::JumpRope => 10,
        }
    }
}

/// A row in `activities`. Timestamps are set by the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "activityId")]
    pub id: Uuid,
    pub activity_type: ActivityType,
    pub done_at: DateTime<Utc>,
    pub duration_in_minutes: i32,
    pub calories_burned: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow for Activity {
    fn from_row(row: &Row) -> DbResult<Self> {
        let raw_type: String = row.try_get_column("activity_type")?;
        let activity_type = ActivityType::parse(&raw_type).ok_or_else(|| {
            DbError::decode("activity_type", format!("unexpected value {raw_type:?}"))
        })?;
        Ok(Self {
            id: row.try_get_column("id")?,
            activity_type,
            done_at: row.try_get_column("done_at")?,
            duration_in_minutes: row.try_get_column("duration_in_minutes")?,
            calories_burned: row.try_get_column("calories_burned")?,
            created_at: row.try_get_column("created_at")?,
            updated_at: row.try_get_column("updated_at")?,
        })
    }
}

/// `POST /v1/activity` body. All three fields are required; an unknown
/// activity type already fails at deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityPayload {
    pub activity_type: ActivityType,
    pub done_at: DateTime<Utc>,
    pub duration_in_minutes: i32,
}

impl NewActivityPayload {
    pub fn validate(&self) -> Result<(), String> {
        rule("durationInMinutes", self.duration_in_minutes >= 1)
    }
}

/// `PATCH /v1/activity/{id}` body. Absent fields leave the column alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityPayload {
    pub activity_type: Option<ActivityType>,
    pub done_at: Option<DateTime<Utc>>,
    pub duration_in_minutes: Option<i32>,
}

impl UpdateActivityPayload {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(minutes) = self.duration_in_minutes {
            rule("durationInMinutes", minutes >= 1)?;
        }
        Ok(())
    }
}

/// Raw query string of `GET /v1/activity`. Everything arrives as text so
/// that malformed values can be dropped instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub activity_type: Option<String>,
    pub done_at_from: Option<String>,
    pub done_at_to: Option<String>,
    pub calories_burned_min: Option<String>,
    pub calories_burned_max: Option<String>,
}

/// The filters that survived validation. A value that fails its check is
/// dropped without narrowing the result set and without an error.
#[derive(Debug, Default, Clone)]
pub struct ActivityFilter {
    pub activity_type: Option<ActivityType>,
    pub done_at_from: Option<DateTime<Utc>>,
    pub done_at_to: Option<DateTime<Utc>>,
    pub calories_burned_min: Option<i32>,
    pub calories_burned_max: Option<i32>,
}

impl ActivityFilter {
    pub fn from_query(query: &ActivityListQuery) -> Self {
        Self {
            activity_type: query.activity_type.as_deref().and_then(ActivityType::parse),
            done_at_from: query.done_at_from.as_deref().and_then(parse_done_at),
            done_at_to: query.done_at_to.as_deref().and_then(parse_done_at),
            calories_burned_min: parse_i32(query.calories_burned_min.as_deref()),
            calories_burned_max: parse_i32(query.calories_burned_max.as_deref()),
        }
    }
}

fn parse_done_at(raw: &str) -> Option<DateTime<Utc>> {
    if !validate::is_strict_iso8601(raw) {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_i32(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.parse().ok())
}
