//! Filtered SELECT builder: optional conditions compose into one
//! parameterized statement.

use crate::qb::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Default page size when the caller supplies no usable limit.
pub const DEFAULT_LIMIT: i64 = 5;

/// Validated pagination window.
///
/// Raw query-string values that are negative or fail to parse fall back to
/// the defaults (limit 5, offset 0) instead of failing the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Parse raw limit/offset strings, falling back per value.
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: parse_non_negative(limit).unwrap_or(DEFAULT_LIMIT),
            offset: parse_non_negative(offset).unwrap_or(0),
        }
    }
}

fn parse_non_negative(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok()).filter(|n| *n >= 0)
}

/// One `column <op> $n` condition.
#[derive(Clone, Debug)]
struct Cond {
    column: String,
    op: &'static str,
    value: Param,
}

/// Builds a parameterized `SELECT * FROM ... WHERE ... ORDER BY ... LIMIT ..
/// OFFSET ..` from optional conditions.
///
/// Every condition value binds through a placeholder; user-supplied text is
/// never concatenated into the statement. `None` values via the `_opt`
/// helpers are skipped, so an ineligible filter leaves no trace in the SQL.
/// Limit and offset are validated integers (see [`Page`]) and are rendered
/// inline the way ordinary numeric pagination is.
#[derive(Clone, Debug, Default)]
pub struct FilteredSelect {
    table: String,
    conditions: Vec<Cond>,
    order_clauses: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl FilteredSelect {
    /// Create a new builder for `table`, selecting all columns.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    fn cond<T: ToSql + Send + Sync + 'static>(
        mut self,
        column: &str,
        op: &'static str,
        value: T,
    ) -> Self {
        self.conditions.push(Cond {
            column: column.to_string(),
            op,
            value: Param::new(value),
        });
        self
    }

    /// Add WHERE: column = value
    pub fn eq<T: ToSql + Send + Sync + 'static>(self, column: &str, value: T) -> Self {
        self.cond(column, "=", value)
    }

    /// Add WHERE: column >= value
    pub fn gte<T: ToSql + Send + Sync + 'static>(self, column: &str, value: T) -> Self {
        self.cond(column, ">=", value)
    }

    /// Add WHERE: column <= value
    pub fn lte<T: ToSql + Send + Sync + 'static>(self, column: &str, value: T) -> Self {
        self.cond(column, "<=", value)
    }

    /// Add WHERE if value is Some: column = value
    pub fn eq_opt<T: ToSql + Send + Sync + 'static>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    /// Add WHERE if value is Some: column >= value
    pub fn gte_opt<T: ToSql + Send + Sync + 'static>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.gte(column, v),
            None => self,
        }
    }

    /// Add WHERE if value is Some: column <= value
    pub fn lte_opt<T: ToSql + Send + Sync + 'static>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.lte(column, v),
            None => self,
        }
    }

    /// Add ORDER BY clause.
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_clauses.push(clause.to_string());
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Apply a validated pagination window.
    pub fn page(self, page: Page) -> Self {
        self.limit(page.limit).offset(page.offset)
    }

    /// Build the statement and its ordered parameters.
    pub fn build(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        let mut sql = format!("SELECT * FROM {}", self.table);

        if !self.conditions.is_empty() {
            let mut parts = Vec::with_capacity(self.conditions.len());
            for c in &self.conditions {
                let idx = params.push_param(c.value.clone());
                parts.push(format!("{} {} ${}", c.column, c.op, idx));
            }
            sql.push_str(" WHERE ");
            sql.push_str(&parts.join(" AND "));
        }

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }

    /// Get the built SQL string (for tests and debugging).
    pub fn to_sql(&self) -> String {
        self.build().0
    }
}
