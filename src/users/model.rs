//! Request DTOs for the user endpoints
//!
//! Every field is optional at the wire level so that missing or empty values
//! surface as field-level validation errors instead of deserialization
//! failures.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub membership_status: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub membership_status: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
}
