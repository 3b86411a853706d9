//! Data models for the user service

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// User row as stored in the `users` table
#[derive(Debug, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership tiers
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Free,
    Premium,
    Vip,
}

impl MembershipStatus {
    /// Accepted wire values, in the order they are reported to clients
    pub const ALLOWED: [&'static str; 3] = ["free", "premium", "vip"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(MembershipStatus::Free),
            "premium" => Some(MembershipStatus::Premium),
            "vip" => Some(MembershipStatus::Vip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Free => "free",
            MembershipStatus::Premium => "premium",
            MembershipStatus::Vip => "vip",
        }
    }
}

/// User representation returned by the API. Carries no password field in any
/// form, so a hash can never leak into a response body.
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            membership_status: user.membership_status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Standard success envelope for single-entity responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Page container for list responses
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_status_parse() {
        assert_eq!(MembershipStatus::parse("free"), Some(MembershipStatus::Free));
        assert_eq!(
            MembershipStatus::parse("premium"),
            Some(MembershipStatus::Premium)
        );
        assert_eq!(MembershipStatus::parse("vip"), Some(MembershipStatus::Vip));
        assert_eq!(MembershipStatus::parse("gold"), None);
        assert_eq!(MembershipStatus::parse("FREE"), None);
        assert_eq!(MembershipStatus::parse(""), None);
    }

    #[test]
    fn test_membership_status_round_trip() {
        for raw in MembershipStatus::ALLOWED {
            let status = MembershipStatus::parse(raw).unwrap();
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_membership_status_serializes_lowercase() {
        let json = serde_json::to_string(&MembershipStatus::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            age: Some(30),
            membership_status: Some(MembershipStatus::Free),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object["name"], "A");
        assert_eq!(object["email"], "a@x.com");
    }

    #[test]
    fn test_api_response_success_shape() {
        let envelope = ApiResponse::success("User created successfully", 42);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["data"], 42);
    }
}
