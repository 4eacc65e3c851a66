//! # paceline-db
//!
//! PostgreSQL access toolkit for the paceline backend.
//!
//! - **Explicit SQL**: repositories build statements with the `qb` builders
//!   or write them by hand; placeholders are positional `$n` with an ordered
//!   [`ParamList`] of bound values.
//! - **Injected handle**: [`Db`] wraps the connection pool and is constructed
//!   once at startup, then passed to every repository. No global state.
//! - **Typed mapping**: rows convert to structs through [`FromRow`].
//!
//! ```ignore
//! let db = Db::connect(&config.database_url, config.pool_size)?;
//! db.ping().await?;
//!
//! let (sql, params) = PartialUpdate::new("users", "id")
//!     .set_opt("weight", payload.weight)
//!     .build(user_id);
//! let row = db.query_one(&sql, &params).await?;
//! ```

pub mod error;
pub mod pool;
pub mod qb;
pub mod row;
pub mod validate;

pub use error::{DbError, DbResult};
pub use pool::Db;
pub use qb::{DEFAULT_LIMIT, FilteredSelect, Page, Param, ParamList, PartialUpdate};
pub use row::{FromRow, RowExt};
