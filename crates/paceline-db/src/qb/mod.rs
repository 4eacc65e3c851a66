//! Query builders.
//!
//! Two builders cover the dynamic SQL this backend generates:
//!
//! - [`PartialUpdate`]: optional-field payloads become `UPDATE .. SET ..`
//!   statements touching only the present fields (or a fetch-by-id when no
//!   field is present).
//! - [`FilteredSelect`]: optional, pre-validated filters compose into one
//!   `SELECT` with deterministic ordering and pagination.
//!
//! Both produce `(String, ParamList)` pairs: statement text with positional
//! `$n` placeholders plus the ordered bound values.

mod param;
mod select;
mod update;

pub use param::{Param, ParamList};
pub use select::{DEFAULT_LIMIT, FilteredSelect, Page};
pub use update::PartialUpdate;
