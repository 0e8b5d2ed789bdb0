//! Handler: catalog.create
//!
//! Every field is optional at decode time so that a missing `name` or
//! `criterion` is reported as a validation failure naming the field, not as
//! a generic decode error.

use serde::Deserialize;
use serde_json::Value;

use crate::awarder::{AchievementDraft, Awarder};
use crate::microsvc::{Context, HandlerError};
use crate::store::ProgressStore;

pub const COMMAND: &str = "catalog.create";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_ref: Option<String>,
    pub criterion: Option<Value>,
}

impl From<Input> for AchievementDraft {
    fn from(input: Input) -> Self {
        AchievementDraft {
            name: input.name,
            description: input.description,
            icon_ref: input.icon_ref,
            criterion: input.criterion,
        }
    }
}

pub fn guard<S>(ctx: &Context<Awarder<S>>) -> bool {
    ctx.principal().is_err() || ctx.raw_input().is_object()
}

pub fn handle<S: ProgressStore>(ctx: &Context<Awarder<S>>) -> Result<Value, HandlerError> {
    let principal = ctx.principal()?;
    let input = ctx.input::<Input>()?;
    let created = ctx.repo().create_achievement(&principal, input.into())?;
    Ok(serde_json::to_value(created)?)
}
