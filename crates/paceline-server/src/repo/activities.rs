//! Persistence for activity records.

use chrono::{DateTime, Utc};
use paceline_db::{Db, DbError, DbResult, FilteredSelect, FromRow, Page, ParamList, PartialUpdate};
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityFilter, ActivityType, UpdateActivityPayload};

#[derive(Clone)]
pub struct ActivityRepo {
    db: Db,
}

impl ActivityRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        activity_type: ActivityType,
        done_at: DateTime<Utc>,
        duration_in_minutes: i32,
        calories_burned: i32,
    ) -> DbResult<Activity> {
        let mut params = ParamList::new();
        params.push(activity_type.as_str());
        params.push(done_at);
        params.push(duration_in_minutes);
        params.push(calories_burned);
        let row = self
            .db
            .query_one(
                "INSERT INTO activities (activity_type, done_at, duration_in_minutes, calories_burned) \
                 VALUES ($1, $2, $3, $4) RETURNING *",
                &params,
            )
            .await?;
        Activity::from_row(&row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Activity> {
        let mut params = ParamList::new();
        params.push(id);
        let row = self
            .db
            .query_one("SELECT * FROM activities WHERE id = $1", &params)
            .await?;
        Activity::from_row(&row)
    }

    pub async fn list(&self, filter: &ActivityFilter, page: Page) -> DbResult<Vec<Activity>> {
        let (sql, params) = Self::list_query(filter, page).build();
        let rows = self.db.query(&sql, &params).await?;
        rows.iter().map(Activity::from_row).collect()
    }

    /// Clauses attach in a fixed order so equivalent filters always produce
    /// the same statement text. Results come back oldest first.
    fn list_query(filter: &ActivityFilter, page: Page) -> FilteredSelect {
        FilteredSelect::new("activities")
            .eq_opt("activity_type", filter.activity_type.map(|t| t.as_str()))
            .gte_opt("done_at", filter.done_at_from)
            .lte_opt("done_at", filter.done_at_to)
            .gte_opt("calories_burned", filter.calories_burned_min)
            .lte_opt("calories_burned", filter.calories_burned_max)
            .order_by("created_at")
            .page(page)
    }

    pub async fn update_partial(
        &self,
        id: Uuid,
        payload: &UpdateActivityPayload,
        calories_burned: Option<i32>,
    ) -> DbResult<Activity> {
        let (sql, params) = Self::update_query(payload, calories_burned).build(id);
        let row = self.db.query_one(&sql, &params).await?;
        Activity::from_row(&row)
    }

    fn update_query(
        payload: &UpdateActivityPayload,
        calories_burned: Option<i32>,
    ) -> PartialUpdate {
        PartialUpdate::new("activities", "id")
            .set_opt("activity_type", payload.activity_type.map(|t| t.as_str()))
            .set_opt("done_at", payload.done_at)
            .set_opt("duration_in_minutes", payload.duration_in_minutes)
            .set_opt("calories_burned", calories_burned)
    }

    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        let mut params = ParamList::new();
        params.push(id);
        let affected = self
            .db
            .execute("DELETE FROM activities WHERE id = $1", &params)
            .await?;
        if affected == 0 {
            return Err(DbError::not_found("activity does not exist"));
        }
        Ok(())
    }
}
