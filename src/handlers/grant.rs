//! Handler: grant
//!
//! Awards an achievement without evaluating its criterion. Reports
//! `409 Conflict` when the learner already holds it.

use serde::Deserialize;
use serde_json::Value;

use crate::awarder::Awarder;
use crate::microsvc::{Context, HandlerError};
use crate::store::ProgressStore;

pub const COMMAND: &str = "grant";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub achievement_id: String,
    #[serde(default)]
    pub learner_id: Option<String>,
}

/// Anonymous callers pass so that `handle` answers 401 before the payload
/// is looked at.
pub fn guard<S>(ctx: &Context<Awarder<S>>) -> bool {
    ctx.principal().is_err() || ctx.has_fields(&["achievementId"])
}

pub fn handle<S: ProgressStore>(ctx: &Context<Awarder<S>>) -> Result<Value, HandlerError> {
    let principal = ctx.principal()?;
    let input = ctx.input::<Input>()?;
    let grant = ctx.repo().grant(
        &principal,
        &input.achievement_id,
        input.learner_id.as_deref(),
    )?;
    Ok(serde_json::to_value(grant)?)
}
