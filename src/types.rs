/// Shared types used across the action layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform envelope returned by every form action.
///
/// A failed result always carries a human-readable message. `data` is only
/// populated on success, with the exception of read actions that degrade to
/// empty defaults (global search).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult<T = ()> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Failure that still hands back best-effort defaults
    pub fn fail_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Dashboard roles as understood by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Employee,
    Guest,
}

impl Role {
    /// Parse a role name, falling back to `Employee` for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "guest" => Role::Guest,
            _ => Role::Employee,
        }
    }

    /// Numeric role id used by the remote API
    pub fn id(self) -> i32 {
        match self {
            Role::Admin => 1,
            Role::Employee => 2,
            Role::Guest => 3,
        }
    }
}

/// Session handed to the action layer by the auth provider.
///
/// Treated as a read-only capability: the layer never refreshes or mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub role: Role,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, role: Role) -> Self {
        Self {
            access_token: Some(access_token.into()),
            role,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// Bearer token if one is present, non-blank and not expired
    pub fn bearer_token(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_role_ids() {
        assert_eq!(Role::from_name("admin").id(), 1);
        assert_eq!(Role::from_name("Employee").id(), 2);
        assert_eq!(Role::from_name("guest").id(), 3);
        assert_eq!(Role::from_name("manager").id(), 2);
        assert_eq!(Role::from_name("").id(), 2);
    }

    #[test]
    fn test_bearer_token_rules() {
        assert_eq!(Session::new("abc", Role::Admin).bearer_token(), Some("abc"));
        assert_eq!(Session::new("   ", Role::Admin).bearer_token(), None);
        assert_eq!(Session::default().bearer_token(), None);

        let expired = Session::new("abc", Role::Guest).with_expiry(Utc::now() - Duration::minutes(1));
        assert!(expired.is_expired());
        assert_eq!(expired.bearer_token(), None);

        let live = Session::new("abc", Role::Guest).with_expiry(Utc::now() + Duration::hours(1));
        assert_eq!(live.bearer_token(), Some("abc"));
    }

    #[test]
    fn test_action_result_serialization_skips_missing_data() {
        let result: ActionResult = ActionResult::fail("Room not found.");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "message": "Room not found."}));
    }
}
