//! Criterion - the closed set of threshold rules an achievement can carry.
//!
//! On the wire and in storage a criterion is a `{ "type": <tag>, "value": <n> }`
//! object. Two decoders exist:
//!
//! - [`Criterion::parse`] is strict. It is used when an administrator creates
//!   an achievement and reports the offending field.
//! - Deserialization is lenient. A stored criterion that no longer parses
//!   becomes [`Criterion::Unsatisfiable`], keeps its raw JSON, and never
//!   matches any snapshot.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::snapshot::LearnerSnapshot;

pub const COURSE_COUNT: &str = "course_count";
pub const QUIZ_PASS_COUNT: &str = "quiz_pass_count";
pub const QUIZ_PERFECT_COUNT: &str = "quiz_perfect_count";
pub const POINTS: &str = "points";
pub const LEVEL: &str = "level";

/// All recognized criterion tags.
pub const TAGS: [&str; 5] = [COURSE_COUNT, QUIZ_PASS_COUNT, QUIZ_PERFECT_COUNT, POINTS, LEVEL];

/// A threshold rule evaluated against a [`LearnerSnapshot`]. All thresholds
/// are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    CourseCountAtLeast(u64),
    QuizPassCountAtLeast(u64),
    QuizPerfectCountAtLeast(u64),
    PointsAtLeast(u64),
    LevelAtLeast(u64),
    /// A stored criterion that failed to decode. Holds the original payload
    /// so it is written back untouched.
    Unsatisfiable(Value),
}

/// Why a criterion payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionError {
    /// Path of the offending field, e.g. `criterion.value`.
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for CriterionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for CriterionError {}

impl Criterion {
    /// Strictly parse a `{type, value}` payload.
    pub fn parse(raw: &Value) -> Result<Self, CriterionError> {
        let object = raw.as_object().ok_or_else(|| CriterionError {
            field: "criterion",
            reason: "must be an object with `type` and `value`".into(),
        })?;

        let tag = match object.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(_) => {
                return Err(CriterionError {
                    field: "criterion.type",
                    reason: "must be a string".into(),
                })
            }
            None => {
                return Err(CriterionError {
                    field: "criterion.type",
                    reason: "is required".into(),
                })
            }
        };

        let build: fn(u64) -> Criterion = match tag {
            COURSE_COUNT => Criterion::CourseCountAtLeast,
            QUIZ_PASS_COUNT => Criterion::QuizPassCountAtLeast,
            QUIZ_PERFECT_COUNT => Criterion::QuizPerfectCountAtLeast,
            POINTS => Criterion::PointsAtLeast,
            LEVEL => Criterion::LevelAtLeast,
            other => {
                return Err(CriterionError {
                    field: "criterion.type",
                    reason: format!("unknown criterion type `{}` (expected one of {})", other, TAGS.join(", ")),
                })
            }
        };

        let threshold = parse_threshold(object.get("value"))?;
        Ok(build(threshold))
    }

    /// Stand-in for a stored definition that has no criterion at all.
    pub fn missing() -> Self {
        Criterion::Unsatisfiable(Value::Null)
    }

    /// Decode a stored payload, failing closed.
    pub fn from_stored(raw: Value) -> Self {
        match Self::parse(&raw) {
            Ok(criterion) => criterion,
            Err(_) => Criterion::Unsatisfiable(raw),
        }
    }

    /// Whether the snapshot meets this criterion. Total: never panics, and
    /// `Unsatisfiable` is always `false`.
    pub fn satisfies(&self, snapshot: &LearnerSnapshot) -> bool {
        match self {
            Criterion::CourseCountAtLeast(n) => snapshot.completed_course_count >= *n,
            Criterion::QuizPassCountAtLeast(n) => snapshot.quiz_pass_count >= *n,
            Criterion::QuizPerfectCountAtLeast(n) => snapshot.quiz_perfect_count >= *n,
            Criterion::PointsAtLeast(n) => snapshot.total_points >= *n,
            Criterion::LevelAtLeast(n) => u64::from(snapshot.level) >= *n,
            Criterion::Unsatisfiable(_) => false,
        }
    }

    pub fn is_satisfiable(&self) -> bool {
        !matches!(self, Criterion::Unsatisfiable(_))
    }

    /// Why a stored payload failed to decode. `None` for usable criteria.
    pub fn defect(&self) -> Option<CriterionError> {
        match self {
            Criterion::Unsatisfiable(raw) => Self::parse(raw).err(),
            _ => None,
        }
    }

    /// The `{type, value}` form of this criterion.
    pub fn to_value(&self) -> Value {
        let (tag, n) = match self {
            Criterion::CourseCountAtLeast(n) => (COURSE_COUNT, n),
            Criterion::QuizPassCountAtLeast(n) => (QUIZ_PASS_COUNT, n),
            Criterion::QuizPerfectCountAtLeast(n) => (QUIZ_PERFECT_COUNT, n),
            Criterion::PointsAtLeast(n) => (POINTS, n),
            Criterion::LevelAtLeast(n) => (LEVEL, n),
            Criterion::Unsatisfiable(raw) => return raw.clone(),
        };
        json!({ "type": tag, "value": n })
    }
}

/// Thresholds are non-negative integers. Numeric strings are accepted since
/// settings screens commonly submit form values as text.
fn parse_threshold(value: Option<&Value>) -> Result<u64, CriterionError> {
    let invalid = |reason: &str| CriterionError {
        field: "criterion.value",
        reason: reason.to_string(),
    };

    match value {
        None | Some(Value::Null) => Err(invalid("is required")),
        Some(Value::Number(n)) => {
            if let Some(n) = n.as_u64() {
                Ok(n)
            } else if n.as_i64().is_some() || n.as_f64().is_some_and(|f| f < 0.0) {
                Err(invalid("must be non-negative"))
            } else {
                Err(invalid("must be an integer"))
            }
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.starts_with('-') {
                return Err(invalid("must be non-negative"));
            }
            trimmed
                .parse::<u64>()
                .map_err(|_| invalid("must be an integer"))
        }
        Some(_) => Err(invalid("must be an integer")),
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Criterion::from_stored(raw))
    }
}
