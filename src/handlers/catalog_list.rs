//! Handler: catalog.list

use serde::{de, Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::awarder::Awarder;
use crate::microsvc::{Context, HandlerError};
use crate::store::ProgressStore;

pub const COMMAND: &str = "catalog.list";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub learner_id: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub include_status: bool,
}

/// Query strings arrive untyped, so `"1"`/`"0"` and `1`/`0` count as booleans.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean `{}`", other))),
        },
        other => Err(de::Error::custom(format!("invalid boolean `{}`", other))),
    }
}

pub fn guard<S>(_ctx: &Context<Awarder<S>>) -> bool {
    true
}

pub fn handle<S: ProgressStore>(ctx: &Context<Awarder<S>>) -> Result<Value, HandlerError> {
    let principal = ctx.principal()?;
    let input = ctx.input::<Input>()?;
    let entries = ctx.repo().catalog(
        &principal,
        input.learner_id.as_deref(),
        input.include_status,
    )?;
    Ok(json!({ "achievements": entries }))
}
