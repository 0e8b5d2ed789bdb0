//! microsvc — Convention-based command handler framework.
//!
//! Register command handlers on a `Service`. Each handler receives a
//! `Context<R>` with access to the input payload, session variables, and
//! the shared state (the achievement `Awarder`).
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use accolade::{handlers, microsvc, InMemoryStore};
//! use serde_json::json;
//!
//! let service = Arc::new(handlers::service(InMemoryStore::new()));
//!
//! // Direct dispatch
//! let session = microsvc::Session::for_user("learner-1", "learner");
//! let result = service.dispatch("evaluate", json!({}), session);
//!
//! // HTTP transport (requires "http" feature)
//! // microsvc::serve(service, "0.0.0.0:3000").await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file follows this convention:
//!
//! ```ignore
//! // src/handlers/grant.rs
//!
//! pub const COMMAND: &str = "grant";
//!
//! pub fn guard<S>(ctx: &microsvc::Context<Awarder<S>>) -> bool {
//!     ctx.principal().is_err() || ctx.has_fields(&["achievementId"])
//! }
//!
//! pub fn handle<S: ProgressStore>(
//!     ctx: &microsvc::Context<Awarder<S>>,
//! ) -> Result<Value, microsvc::HandlerError> {
//!     let principal = ctx.principal()?;
//!     let input = ctx.input::<Input>()?;
//!     let grant = ctx.repo().grant(&principal, &input.achievement_id, input.learner_id.as_deref())?;
//!     Ok(serde_json::to_value(grant)?)
//! }
//! ```

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, ROLE_KEY, USER_ID_KEY};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str` — the command name
/// - `guard(ctx) -> bool` — input validation
/// - `handle(ctx) -> Result<Value, HandlerError>` — the handler
///
/// # Example
/// ```ignore
/// let service = accolade::register_handlers!(
///     microsvc::Service::new(Awarder::new(InMemoryStore::new())),
///     handlers::evaluate,
///     handlers::grant,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
