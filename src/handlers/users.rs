//! User CRUD handlers
//!
//! Each handler validates its input, issues a single store operation, and
//! translates store errors into API responses by exhaustive match.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{ApiResponse, PaginatedResponse, UserResponse};
use crate::state::AppState;
use crate::users::{
    CreateUserRequest, ListUsersQuery, NewUser, StoreError, UpdateUserRequest, UserChanges,
};
use crate::validation::{self, FieldErrors};

const EMAIL_TAKEN: &str = "The email has already been taken.";

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("User with ID {} not found", id))
}

/// Map store failures that are not expected to be "not found" at the call
/// site. Conflicts are uniqueness races that slipped past the pre-check;
/// per the API contract they surface as a 500-class database error.
fn persistence_error(err: StoreError) -> ApiError {
    match err {
        StoreError::Conflict(detail) => ApiError::Database(detail),
        StoreError::Database(detail) => ApiError::Database(detail),
        StoreError::NotFound => ApiError::NotFound("User not found".to_string()),
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| ApiError::Internal(e.to_string()))
}

/// `GET /api/users` — one page of users, newest first
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let page = query.page.unwrap_or(1);

    let users_page = state.users.list(page).await.map_err(persistence_error)?;

    Ok(Json(PaginatedResponse {
        data: users_page.data.into_iter().map(UserResponse::from).collect(),
        total: users_page.total,
        page: users_page.page,
        per_page: users_page.per_page,
    }))
}

/// `POST /api/users` — create a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let validated = validation::validate_create(&request);

    let mut errors = match &validated {
        Ok(_) => FieldErrors::default(),
        Err(field_errors) => field_errors.clone(),
    };

    // Uniqueness is checked only when the email itself passed its syntactic
    // rules, so the probe never runs on garbage input.
    if !errors.contains("email") {
        if let Some(email) = request.email.as_deref() {
            if state
                .users
                .email_in_use(email, None)
                .await
                .map_err(persistence_error)?
            {
                errors.push("email", EMAIL_TAKEN);
            }
        }
    }

    let fields = match validated {
        Ok(fields) if errors.is_empty() => fields,
        _ => return Err(ApiError::Validation(errors)),
    };

    let password_hash = hash_password(&fields.password)?;

    let created = state
        .users
        .create(NewUser {
            name: fields.name,
            email: fields.email,
            password_hash,
            age: fields.age,
            membership_status: fields.membership_status,
        })
        .await
        .map_err(persistence_error)?;

    tracing::info!(user_id = %created.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "User created successfully",
            UserResponse::from(created),
        )),
    ))
}

/// `GET /api/users/:id` — fetch a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    match state.users.find_by_id(id).await {
        Ok(user) => Ok(Json(ApiResponse::success(
            "User retrieved successfully",
            UserResponse::from(user),
        ))),
        Err(StoreError::NotFound) => Err(not_found(id)),
        Err(other) => Err(persistence_error(other)),
    }
}

/// `PUT/PATCH /api/users/:id` — partial update; absent fields keep their
/// stored values
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    // Lookup first: an unknown id is a 404 regardless of body contents.
    match state.users.find_by_id(id).await {
        Ok(_) => {}
        Err(StoreError::NotFound) => return Err(not_found(id)),
        Err(other) => return Err(persistence_error(other)),
    }

    let validated = validation::validate_update(&request);

    let mut errors = match &validated {
        Ok(_) => FieldErrors::default(),
        Err(field_errors) => field_errors.clone(),
    };

    if !errors.contains("email") {
        if let Some(email) = request.email.as_deref() {
            if state
                .users
                .email_in_use(email, Some(id))
                .await
                .map_err(persistence_error)?
            {
                errors.push("email", EMAIL_TAKEN);
            }
        }
    }

    let fields = match validated {
        Ok(fields) if errors.is_empty() => fields,
        _ => return Err(ApiError::Validation(errors)),
    };

    let password_hash = match fields.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let changes = UserChanges {
        name: fields.name,
        email: fields.email,
        password_hash,
        age: fields.age,
        membership_status: fields.membership_status,
    };

    match state.users.update(id, changes).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User updated");
            Ok(Json(ApiResponse::success(
                "User updated successfully",
                UserResponse::from(user),
            )))
        }
        Err(StoreError::NotFound) => Err(not_found(id)),
        Err(other) => Err(persistence_error(other)),
    }
}

/// `DELETE /api/users/:id` — permanent delete, empty 204 on success
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.users.delete(id).await {
        Ok(()) => {
            tracing::info!(user_id = %id, "User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound) => Err(not_found(id)),
        Err(other) => Err(persistence_error(other)),
    }
}
