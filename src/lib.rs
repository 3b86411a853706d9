//! User resource service library
//!
//! REST CRUD for the `User` entity: paginated list, create, read, partial
//! update, delete, backed by Postgres.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod users;
pub mod validation;
