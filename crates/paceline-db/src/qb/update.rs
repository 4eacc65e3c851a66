//! Partial UPDATE builder: only columns whose values are present make it
//! into the SET clause.

use crate::qb::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Builds a parameterized `UPDATE ... SET ... WHERE id = .. RETURNING *`
/// from an optional-field payload.
///
/// Repositories declare the (field, column) mapping once, in order, with
/// `set_opt` calls; absent (`None`) fields never reach the statement. An
/// update with zero present fields degrades to a plain fetch of the current
/// row, so an empty patch still answers with state instead of producing a
/// malformed empty SET clause.
///
/// # Example
///
/// ```
/// use paceline_db::qb::PartialUpdate;
///
/// let (sql, params) = PartialUpdate::new("users", "id")
///     .set_opt("weight", Some(80i32))
///     .set_opt("height", None::<i32>)
///     .build("u1");
/// assert_eq!(sql, "UPDATE users SET weight = $1 WHERE id = $2 RETURNING *");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PartialUpdate {
    table: String,
    id_column: String,
    set_fields: Vec<(String, Param)>,
}

impl PartialUpdate {
    /// Create a builder for `table`, matched on `id_column`.
    pub fn new(table: &str, id_column: &str) -> Self {
        Self {
            table: table.to_string(),
            id_column: id_column.to_string(),
            set_fields: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.set_fields.push((column.to_string(), Param::new(value)));
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, column: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(column, v)
        } else {
            self
        }
    }

    /// Number of present fields accumulated so far.
    pub fn field_count(&self) -> usize {
        self.set_fields.len()
    }

    /// Build the statement and its ordered parameters.
    ///
    /// With at least one present field the parameter list holds exactly one
    /// entry per field plus the id; the id always binds through its own
    /// placeholder, so a SET on the id column cannot collide with the WHERE
    /// condition. With zero present fields this returns a select-by-id with
    /// the id as its single parameter.
    pub fn build<I: ToSql + Send + Sync + 'static>(&self, id: I) -> (String, ParamList) {
        let mut params = ParamList::new();

        if self.set_fields.is_empty() {
            let idx = params.push(id);
            let sql = format!(
                "SELECT * FROM {} WHERE {} = ${}",
                self.table, self.id_column, idx
            );
            return (sql, params);
        }

        let mut set_parts = Vec::with_capacity(self.set_fields.len());
        for (col, param) in &self.set_fields {
            let idx = params.push_param(param.clone());
            set_parts.push(format!("{} = ${}", col, idx));
        }

        let id_idx = params.push(id);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
            self.table,
            set_parts.join(", "),
            self.id_column,
            id_idx
        );

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_updates_only_that_column() {
        let (sql, params) = PartialUpdate::new("users", "id")
            .set_opt("weight", Some(80i32))
            .build("u1");
        assert_eq!(sql, "UPDATE users SET weight = $1 WHERE id = $2 RETURNING *");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn absent_fields_never_emit_assignments() {
        let (sql, params) = PartialUpdate::new("users", "id")
            .set_opt("preference", Some("CARDIO"))
            .set_opt("weight_unit", None::<&str>)
            .set_opt("weight", Some(75i32))
            .set_opt("height", None::<i32>)
            .build("u1");
        assert_eq!(
            sql,
            "UPDATE users SET preference = $1, weight = $2 WHERE id = $3 RETURNING *"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn zero_fields_degrades_to_select_by_id() {
        let (sql, params) = PartialUpdate::new("users", "id")
            .set_opt("weight", None::<i32>)
            .set_opt("height", None::<i32>)
            .build("u1");
        assert_eq!(sql, "SELECT * FROM users WHERE id = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn k_fields_yield_k_assignments_and_k_plus_one_params() {
        for k in 1..=6usize {
            let mut qb = PartialUpdate::new("activities", "id");
            for i in 0..k {
                qb = qb.set(&format!("col{}", i), i as i32);
            }
            let (sql, params) = qb.build("a1");
            assert_eq!(params.len(), k + 1);
            assert_eq!(sql.matches(" = $").count(), k + 1);
            assert_eq!(sql.matches(", ").count(), k - 1);
        }
    }

    #[test]
    fn id_column_in_set_uses_distinct_placeholder() {
        let (sql, params) = PartialUpdate::new("users", "id")
            .set("id", "u2")
            .build("u1");
        assert_eq!(sql, "UPDATE users SET id = $1 WHERE id = $2 RETURNING *");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn field_count_tracks_present_fields() {
        let qb = PartialUpdate::new("users", "id")
            .set_opt("name", Some("Ada"))
            .set_opt("weight", None::<i32>);
        assert_eq!(qb.field_count(), 1);
    }
}
