//! Persistence for user accounts.

use paceline_db::{Db, DbResult, FromRow, ParamList, PartialUpdate};
use uuid::Uuid;

use crate::models::user::{UpdateUserPayload, User};

#[derive(Clone)]
pub struct UserRepo {
    db: Db,
}

impl UserRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn insert(&self, email: &str, password_hash: &str) -> DbResult<User> {
        let mut params = ParamList::new();
        params.push(email.to_string());
        params.push(password_hash.to_string());
        let row = self
            .db
            .query_one(
                "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
                &params,
            )
            .await?;
        User::from_row(&row)
    }

    /// Emails are matched case-insensitively; the unique index uses the
    /// same expression.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let mut params = ParamList::new();
        params.push(email.to_string());
        let row = self
            .db
            .query_opt("SELECT * FROM users WHERE LOWER(email) = LOWER($1)", &params)
            .await?;
        row.map(|r| User::from_row(&r)).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbResult<User> {
        let mut params = ParamList::new();
        params.push(id);
        let row = self
            .db
            .query_one("SELECT * FROM users WHERE id = $1", &params)
            .await?;
        User::from_row(&row)
    }

    pub async fn update_partial(&self, id: Uuid, payload: &UpdateUserPayload) -> DbResult<User> {
        let (sql, params) = Self::update_query(payload).build(id);
        let row = self.db.query_one(&sql, &params).await?;
        User::from_row(&row)
    }

    /// Only fields present in the payload make it into the SET list. An
    /// empty payload degrades to a read of the current row.
    fn update_query(payload: &UpdateUserPayload) -> PartialUpdate {
        PartialUpdate::new("users", "id")
            .set_opt("preference", payload.preference.map(|p| p.as_str()))
            .set_opt("weight_unit", payload.weight_unit.map(|u| u.as_str()))
            .set_opt("height_unit", payload.height_unit.map(|u| u.as_str()))
            .set_opt("weight", payload.weight)
            .set_opt("height", payload.height)
            .set_opt("name", payload.name.clone())
            .set_opt("image_uri", payload.image_uri.clone())
    }
}
