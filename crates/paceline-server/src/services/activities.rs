//! Activity CRUD and the calorie bookkeeping around it.

use paceline_db::{DbError, Page};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::activity::{
    Activity, ActivityFilter, NewActivityPayload, UpdateActivityPayload,
};
use crate::repo::ActivityRepo;

#[derive(Clone)]
pub struct ActivityService {
    activities: ActivityRepo,
}

impl ActivityService {
    pub fn new(activities: ActivityRepo) -> Self {
        Self { activities }
    }

    pub async fn create(&self, payload: &NewActivityPayload) -> ApiResult<Activity> {
        let calories = payload.activity_type.calories_per_minute() * payload.duration_in_minutes;
        let activity = self
            .activities
            .insert(
                payload.activity_type,
                payload.done_at,
                payload.duration_in_minutes,
                calories,
            )
            .await?;
        Ok(activity)
    }

    pub async fn list(&self, filter: &ActivityFilter, page: Page) -> ApiResult<Vec<Activity>> {
        Ok(self.activities.list(filter, page).await?)
    }

    /// Stored calories always reflect the row's final type and duration.
    /// When only one of the two changes, the other half comes from the
    /// current row.
    pub async fn update(&self, id: Uuid, payload: &UpdateActivityPayload) -> ApiResult<Activity> {
        let calories = match (payload.activity_type, payload.duration_in_minutes) {
            (None, None) => None,
            (Some(activity_type), Some(minutes)) => {
                Some(activity_type.calories_per_minute() * minutes)
            }
            _ => {
                let current = self
                    .activities
                    .find_by_id(id)
                    .await
                    .map_err(activity_not_found)?;
                Some(recomputed_calories(&current, payload))
            }
        };
        self.activities
            .update_partial(id, payload, calories)
            .await
            .map_err(activity_not_found)
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.activities.delete(id).await.map_err(activity_not_found)
    }
}

fn recomputed_calories(current: &Activity, payload: &UpdateActivityPayload) -> i32 {
    let activity_type = payload.activity_type.unwrap_or(current.activity_type);
    let minutes = payload
        .duration_in_minutes
        .unwrap_or(current.duration_in_minutes);
    activity_type.calories_per_minute() * minutes
}

fn activity_not_found(err: DbError) -> ApiError {
    if err.is_not_found() {
        ApiError::not_found("Activity is not found")
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::activity::ActivityType;

    fn stored(activity_type: ActivityType, minutes: i32) -> Activity {
        let now = Utc::now();
        Activity {
            id: Uuid::new_v4(),
            activity_type,
            done_at: now,
            duration_in_minutes: minutes,
            calories_burned: activity_type.calories_per_minute() * minutes,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_duration_recomputes_against_the_stored_type() {
        let current = stored(ActivityType::Running, 20);
        let payload = UpdateActivityPayload {
            duration_in_minutes: Some(45),
            ..Default::default()
        };
        assert_eq!(recomputed_calories(&current, &payload), 450);
    }

    #[test]
    fn new_type_recomputes_against_the_stored_duration() {
        let current = stored(ActivityType::Walking, 30);
        let payload = UpdateActivityPayload {
            activity_type: Some(ActivityType::Swimming),
            ..Default::default()
        };
        assert_eq!(recomputed_calories(&current, &payload), 240);
    }
}
