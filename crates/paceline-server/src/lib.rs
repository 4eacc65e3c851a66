//! HTTP service for the paceline fitness tracker.
//!
//! Layering follows the request path: `handlers` validate and shape
//! responses, `services` hold the business rules, `repo` owns the SQL and
//! talks to Postgres through `paceline_db`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;
