use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account role. Only "hr" holds the manager capability.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Hr,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Accepted,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,  // UNIQUE KEY - duplicate check on insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default = "default_status")]
    pub status: UserStatus,
    /// Email of the hr manager that accepted this user, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

// Default functions for serde
fn default_role() -> Role {
    Role::Employee
}

fn default_status() -> UserStatus {
    UserStatus::Pending
}
