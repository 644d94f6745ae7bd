// User domain models
use serde::{Deserialize, Serialize};

/// A user row as persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// The logged-in shell user. Department is derived from the role.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
    pub department: String,
    pub last_login: String,
}
