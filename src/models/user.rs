use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claim key under which the identity provider lists the user's roles
pub const DEFAULT_ROLES_CLAIM: &str = "https://virtual-fitting-room-eight.vercel.app/roles";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Individual,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Individual => "individual",
        }
    }
}

/// Admin if the roles claim is an array containing `"admin"`, individual otherwise
pub fn derive_role(claims: &Value, roles_claim: &str) -> Role {
    let is_admin = claims
        .get(roles_claim)
        .and_then(Value::as_array)
        .map(|roles| roles.iter().any(|r| r.as_str() == Some("admin")))
        .unwrap_or(false);

    if is_admin {
        Role::Admin
    } else {
        Role::Individual
    }
}

/// Signed-in user for the lifetime of the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl User {
    pub fn from_claims(claims: &Value, roles_claim: &str) -> Result<Self, AppError> {
        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::Validation("Identity has no email claim".to_string()))?;

        let name = claims
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(User {
            email: email.to_string(),
            name,
            role: derive_role(claims, roles_claim),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
