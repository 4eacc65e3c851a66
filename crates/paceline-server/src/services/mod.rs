//! Business rules between the handlers and the repositories.

mod activities;
mod auth;
mod files;
mod users;

pub use activities::ActivityService;
pub use auth::{AuthResponse, AuthService};
pub use files::FileService;
pub use users::UserService;
