// Shell authentication - Fixed credential list, session user in memory
use crate::domain::user::SessionUser;
use chrono::Utc;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
}

struct Credential {
    username: &'static str,
    password: &'static str,
    role: &'static str,
}

// Note: this list is intentionally independent of the SQLite `users` table.
// The two authentication paths were never unified upstream; see DESIGN.md.
const CREDENTIALS: [Credential; 3] = [
    Credential { username: "admin", password: "admin123", role: "Administrator" },
    Credential { username: "editor", password: "editor123", role: "Editor" },
    Credential { username: "viewer", password: "viewer123", role: "Viewer" },
];

pub struct AuthService {
    current: RwLock<Option<SessionUser>>,
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Plain equality check against the fixed list. On success the session
    /// user is stored; on failure nothing changes.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let matched = CREDENTIALS
            .iter()
            .find(|c| c.username == username && c.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = SessionUser {
            username: matched.username.to_string(),
            role: matched.role.to_string(),
            department: Self::department_for(matched.role).to_string(),
            last_login: Utc::now().to_rfc3339(),
        };

        if let Ok(mut current) = self.current.write() {
            *current = Some(user.clone());
        }
        tracing::debug!("user '{}' authenticated as {}", user.username, user.role);
        Ok(user)
    }

    pub fn logout(&self) -> Option<SessionUser> {
        self.current.write().ok()?.take()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.current.read().ok()?.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.current_user().map(|u| u.role == role).unwrap_or(false)
    }

    fn department_for(role: &str) -> &'static str {
        match role {
            "Administrator" => "Management",
            "Editor" => "Finance",
            _ => "Audit",
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_login_assigns_role_and_department() {
        let auth = AuthService::new();
        let user = auth.authenticate("admin", "admin123").unwrap();

        assert_eq!(user.role, "Administrator");
        assert_eq!(user.department, "Management");
        assert!(auth.is_authenticated());
        assert!(auth.has_role("Administrator"));
    }

    #[test]
    fn test_wrong_password_creates_no_session() {
        let auth = AuthService::new();
        let result = auth.authenticate("admin", "wrong");

        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
        assert!(auth.current_user().is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let auth = AuthService::new();
        auth.authenticate("viewer", "viewer123").unwrap();

        let user = auth.logout().unwrap();
        assert_eq!(user.department, "Audit");
        assert!(!auth.is_authenticated());
        assert!(auth.logout().is_none());
    }
}
