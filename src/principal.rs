//! Authenticated principals and who may act on whose behalf.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AwardError;
use crate::microsvc::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Learner,
    Instructor,
    Admin,
}

impl Role {
    /// Instructors and admins may act on other learners.
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Learner => "learner",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AwardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learner" => Ok(Role::Learner),
            "instructor" => Ok(Role::Instructor),
            "admin" => Ok(Role::Admin),
            other => Err(AwardError::Unauthorized(format!("unknown role `{}`", other))),
        }
    }
}

/// The caller, as established by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn learner(id: impl Into<String>) -> Self {
        Self::new(id, Role::Learner)
    }

    pub fn instructor(id: impl Into<String>) -> Self {
        Self::new(id, Role::Instructor)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Authenticate from session variables.
    ///
    /// A missing or blank user id, or an unrecognized role, is `Unauthorized`.
    /// A missing role means `learner`.
    pub fn from_session(session: &Session) -> Result<Self, AwardError> {
        let id = session
            .user_id()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AwardError::Unauthorized("missing user ID in session".into()))?;
        let role = match session.role() {
            Some(role) => role.parse()?,
            None => Role::Learner,
        };
        Ok(Self::new(id, role))
    }

    /// Resolve the learner an operation targets.
    ///
    /// Omitted targets default to the caller. Acting on anyone else requires
    /// an elevated role.
    pub fn resolve_target<'a>(&'a self, learner_id: Option<&'a str>) -> Result<&'a str, AwardError> {
        match learner_id {
            None => Ok(&self.id),
            Some(target) if target == self.id => Ok(target),
            Some(target) if self.role.is_elevated() => Ok(target),
            Some(target) => Err(AwardError::Forbidden(format!(
                "{} {} may not act on learner {}",
                self.role, self.id, target
            ))),
        }
    }

    pub fn require_elevated(&self, action: &str) -> Result<(), AwardError> {
        if self.role.is_elevated() {
            Ok(())
        } else {
            Err(AwardError::Forbidden(format!(
                "{} requires an instructor or admin role",
                action
            )))
        }
    }

    pub fn require_admin(&self, action: &str) -> Result<(), AwardError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AwardError::Forbidden(format!("{} requires the admin role", action)))
        }
    }
}
