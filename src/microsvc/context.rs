//! Context passed to command handlers.
//!
//! Carries the parsed input, session variables, and a reference to the
//! shared state the service was built with. Handlers access everything they
//! need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;
use crate::principal::Principal;

/// The context passed to every command handler.
///
/// Generic over `R` (the state type) so handlers can reach whatever the
/// service is configured with, typically an `Awarder` over some store.
///
/// ## Example
///
/// ```ignore
/// pub fn handle<S: ProgressStore>(ctx: &Context<Awarder<S>>) -> Result<Value, HandlerError> {
///     let principal = ctx.principal()?;
///     let input = ctx.input::<Input>()?;
///     // ...
/// }
/// ```
pub struct Context<'a, R> {
    /// Raw JSON input from the request.
    input: Value,
    /// Session variables (user ID, role, etc.).
    session: Session,
    /// Reference to the shared state.
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    /// Create a new context.
    pub(crate) fn new(input: Value, session: Session, repo: &'a R) -> Self {
        Self {
            input,
            session,
            repo,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone()).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Authenticate the caller from the session.
    pub fn principal(&self) -> Result<Principal, HandlerError> {
        Ok(Principal::from_session(&self.session)?)
    }

    /// Get a reference to the shared state.
    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Check if the raw input contains a non-null field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|v| !v.is_null())
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
