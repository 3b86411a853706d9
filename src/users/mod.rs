//! User persistence and request types

pub mod model;
pub mod service;

pub use model::{CreateUserRequest, ListUsersQuery, UpdateUserRequest};
pub use service::{NewUser, StoreError, UserChanges, UserService};
