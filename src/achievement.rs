//! Achievement definitions and award records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::criterion::Criterion;
use crate::Record;

/// An administrator-authored achievement.
///
/// `name`, `description` and `icon_ref` are presentation metadata and play no
/// part in evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "achievements")]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_ref: Option<String>,
    #[serde(default = "Criterion::missing")]
    pub criterion: Criterion,
    pub created_at: DateTime<Utc>,
}

/// A validated achievement awaiting insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAchievement {
    pub name: String,
    pub description: Option<String>,
    pub icon_ref: Option<String>,
    pub criterion: Criterion,
}

/// Durable proof that a learner holds an achievement.
///
/// Unique per `(learner_id, achievement_id)`; `earned_at` is stamped by the
/// store at the moment of insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "awards")]
#[serde(rename_all = "camelCase")]
pub struct AwardRecord {
    #[record(key)]
    pub learner_id: String,
    #[record(key)]
    pub achievement_id: String,
    pub earned_at: DateTime<Utc>,
}

/// A catalog listing row, optionally annotated with a learner's status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub achievement: AchievementDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    pub fn plain(achievement: AchievementDefinition) -> Self {
        Self {
            achievement,
            held: None,
            earned_at: None,
        }
    }

    pub fn with_status(achievement: AchievementDefinition, award: Option<&AwardRecord>) -> Self {
        Self {
            achievement,
            held: Some(award.is_some()),
            earned_at: award.map(|a| a.earned_at),
        }
    }
}
