//! Repositories own the SQL. Each one holds a cloned [`paceline_db::Db`]
//! handle and maps rows into model structs.

mod activities;
mod users;

pub use activities::ActivityRepo;
pub use users::UserRepo;
