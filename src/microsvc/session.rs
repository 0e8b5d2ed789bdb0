//! Session variables from the request context.

use std::collections::HashMap;

/// Session variable carrying the authenticated user id.
pub const USER_ID_KEY: &str = "x-user-id";

/// Session variable carrying the user's role (`learner`, `instructor`, `admin`).
pub const ROLE_KEY: &str = "x-user-role";

/// Parsed session variables from the incoming request.
///
/// The gateway in front of the service authenticates the request token and
/// forwards the result as variables (HTTP headers on the HTTP transport):
///
/// ```json
/// {
///   "x-user-id": "learner-42",
///   "x-user-role": "learner"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Create a session for a user with a role.
    pub fn for_user(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_KEY, user_id);
        session.set(ROLE_KEY, role);
        session
    }

    /// Get the user ID (`x-user-id`).
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_KEY)
    }

    /// Get the user role (`x-user-role`).
    pub fn role(&self) -> Option<&str> {
        self.get(ROLE_KEY)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Check if a session variable exists.
    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Get all session variables.
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }
}
