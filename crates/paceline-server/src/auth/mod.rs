//! Authentication: token issuing, password hashing and the request guard.

mod extractor;
mod jwt;
pub mod password;

pub use extractor::AuthUser;
pub use jwt::{Claims, Jwt};
