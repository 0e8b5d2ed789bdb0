//! Handler: evaluate
//!
//! Builds the target learner's snapshot and awards every newly-satisfied
//! achievement. `learnerId` defaults to the caller.

use serde::Deserialize;
use serde_json::Value;

use crate::awarder::Awarder;
use crate::microsvc::{Context, HandlerError};
use crate::store::ProgressStore;

pub const COMMAND: &str = "evaluate";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub learner_id: Option<String>,
}

pub fn guard<S>(_ctx: &Context<Awarder<S>>) -> bool {
    true
}

pub fn handle<S: ProgressStore>(ctx: &Context<Awarder<S>>) -> Result<Value, HandlerError> {
    let principal = ctx.principal()?;
    let input = ctx.input::<Input>()?;
    let evaluation = ctx.repo().evaluate(&principal, input.learner_id.as_deref())?;
    Ok(serde_json::to_value(evaluation)?)
}
