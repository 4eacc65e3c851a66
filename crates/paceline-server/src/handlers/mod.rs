//! HTTP handlers. Each one validates the input, calls a service and
//! shapes the response.

pub mod activity;
pub mod auth;
pub mod file;
pub mod health;
pub mod user;
