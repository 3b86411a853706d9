//! User store backed by Postgres
//!
//! The service exposes exactly the persistence operations the handlers need
//! and reports failures as explicit error kinds instead of raw sqlx errors.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{MembershipStatus, PaginatedResponse, User};

/// Fixed page size for user listings
pub const PAGE_SIZE: i64 = 10;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Store-level failure kinds
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }
        StoreError::Database(err.to_string())
    }
}

/// Fields for a new user row; the password arrives already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
}

/// Partial update; `None` leaves the stored column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.age.is_none()
            && self.membership_status.is_none()
    }
}

/// Clamp a 1-based page number and derive the row offset. Saturates so an
/// absurdly large page yields an offset past the table instead of an
/// arithmetic overflow.
fn page_offset(page: i64) -> (i64, i64) {
    let page = page.max(1);
    (page, (page - 1).saturating_mul(PAGE_SIZE))
}

/// User persistence service
#[derive(Clone)]
pub struct UserService {
    db_pool: PgPool,
}

impl UserService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Fetch one page of users, newest first. Pages are 1-based; anything
    /// below 1 is clamped.
    pub async fn list(&self, page: i64) -> Result<PaginatedResponse<User>, StoreError> {
        let (page, offset) = page_offset(page);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC, id LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(PaginatedResponse {
            data: users,
            total,
            page,
            per_page: PAGE_SIZE,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(user)
    }

    /// Check whether an email is already taken, case-insensitively, excluding
    /// the given user id when present (self-exclusion on update).
    pub async fn email_in_use(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE LOWER(email) = LOWER($1)
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(taken)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, age, membership_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.age)
        .bind(new_user.membership_status)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Apply a partial update and return the resulting row. An empty change
    /// set reduces to a plain lookup.
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query_builder = sqlx::QueryBuilder::new("UPDATE users SET updated_at = NOW()");

        if let Some(name) = &changes.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name);
        }
        if let Some(email) = &changes.email {
            query_builder.push(", email = ");
            query_builder.push_bind(email);
        }
        if let Some(password_hash) = &changes.password_hash {
            query_builder.push(", password_hash = ");
            query_builder.push_bind(password_hash);
        }
        if let Some(age) = changes.age {
            query_builder.push(", age = ");
            query_builder.push_bind(age);
        }
        if let Some(status) = changes.membership_status {
            query_builder.push(", membership_status = ");
            query_builder.push_bind(status);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" RETURNING *");

        let user = query_builder
            .build_query_as::<User>()
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(user)
    }

    /// Delete a user permanently
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
