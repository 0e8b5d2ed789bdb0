//! Awarder - turns a learner's activity into durable, exactly-once awards.
//!
//! ## Evaluation
//!
//! 1. Resolve the target learner (self, or anyone for elevated roles).
//! 2. Build a [`LearnerSnapshot`].
//! 3. Load the achievements the learner does not hold yet.
//! 4. Evaluate each criterion against the snapshot.
//! 5. Conditionally insert an award for each satisfied criterion.
//! 6. Report only the awards this call actually created.
//!
//! No application-level lock is taken. Two evaluations racing on the same
//! learner both reach step 5; the store's uniqueness guarantee lets exactly
//! one of them create the award and the other sees a no-op.
//!
//! ## Example
//!
//! ```ignore
//! use accolade::{Awarder, InMemoryStore, Principal};
//!
//! let awarder = Awarder::new(InMemoryStore::new());
//! let evaluation = awarder.evaluate(&Principal::learner("u1"), None)?;
//! for achievement in &evaluation.newly_awarded {
//!     println!("unlocked {}", achievement.name);
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::achievement::{AchievementDefinition, AwardRecord, CatalogEntry, NewAchievement};
use crate::criterion::Criterion;
use crate::error::AwardError;
use crate::principal::Principal;
use crate::snapshot::{build_snapshot, LearnerSnapshot};
use crate::store::ProgressStore;

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub learner_id: String,
    pub snapshot: LearnerSnapshot,
    pub newly_awarded: Vec<AchievementDefinition>,
    /// How many unheld achievements were checked.
    pub evaluated_count: usize,
}

/// Result of an explicit grant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub award: AwardRecord,
    pub achievement: AchievementDefinition,
}

/// Unvalidated achievement fields as submitted by an administrator.
#[derive(Debug, Clone, Default)]
pub struct AchievementDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_ref: Option<String>,
    pub criterion: Option<Value>,
}

impl AchievementDraft {
    /// Validate into a [`NewAchievement`]. Fails fast on the first bad field.
    pub fn validate(self) -> Result<NewAchievement, AwardError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AwardError::ValidationFailed {
                field: "name",
                reason: "is required".into(),
            })?;

        let raw = self.criterion.ok_or_else(|| AwardError::ValidationFailed {
            field: "criterion",
            reason: "is required".into(),
        })?;
        let criterion = Criterion::parse(&raw).map_err(|e| AwardError::ValidationFailed {
            field: e.field,
            reason: e.reason,
        })?;

        Ok(NewAchievement {
            name,
            description: non_blank(self.description),
            icon_ref: non_blank(self.icon_ref),
            criterion,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Orchestrates snapshots, criteria and award persistence over a store.
pub struct Awarder<S> {
    store: S,
}

impl<S: ProgressStore> Awarder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluate a learner and award every newly-satisfied achievement.
    ///
    /// `learner_id` defaults to the caller. Re-running against unchanged
    /// activity creates nothing and returns an empty `newly_awarded`.
    pub fn evaluate(
        &self,
        principal: &Principal,
        learner_id: Option<&str>,
    ) -> Result<Evaluation, AwardError> {
        let target = principal.resolve_target(learner_id)?;
        let snapshot = build_snapshot(&self.store, target)?;
        let candidates = self.store.list_unheld(target)?;
        let evaluated_count = candidates.len();

        let mut newly_awarded = Vec::new();
        for achievement in candidates {
            if let Some(defect) = achievement.criterion.defect() {
                warn!(
                    achievement_id = %achievement.id,
                    criterion = %achievement.criterion.to_value(),
                    field = defect.field,
                    reason = %defect.reason,
                    "skipping achievement with malformed criterion"
                );
                continue;
            }
            if !achievement.criterion.satisfies(&snapshot) {
                continue;
            }
            match self.store.insert_award_if_absent(target, &achievement.id)? {
                Some(award) => {
                    info!(
                        learner_id = target,
                        achievement_id = %achievement.id,
                        earned_at = %award.earned_at,
                        "awarded achievement"
                    );
                    newly_awarded.push(achievement);
                }
                None => {
                    debug!(
                        learner_id = target,
                        achievement_id = %achievement.id,
                        "award already recorded by a concurrent evaluation"
                    );
                }
            }
        }

        debug!(
            learner_id = target,
            evaluated_count,
            awarded = newly_awarded.len(),
            "evaluation complete"
        );
        Ok(Evaluation {
            learner_id: target.to_string(),
            snapshot,
            newly_awarded,
            evaluated_count,
        })
    }

    /// Award an achievement without checking its criterion.
    ///
    /// Requires an elevated role. Unlike evaluation, granting an achievement
    /// the learner already holds is reported as `Conflict`.
    pub fn grant(
        &self,
        principal: &Principal,
        achievement_id: &str,
        learner_id: Option<&str>,
    ) -> Result<Grant, AwardError> {
        principal.require_elevated("granting an achievement")?;
        let target = principal.resolve_target(learner_id)?;

        let achievement = self
            .store
            .get_achievement(achievement_id)?
            .ok_or_else(|| AwardError::NotFound {
                kind: "achievement",
                id: achievement_id.to_string(),
            })?;

        match self.store.insert_award_if_absent(target, &achievement.id)? {
            Some(award) => {
                info!(
                    granted_by = %principal.id,
                    learner_id = target,
                    achievement_id = %achievement.id,
                    "granted achievement"
                );
                Ok(Grant { award, achievement })
            }
            None => {
                warn!(
                    granted_by = %principal.id,
                    learner_id = target,
                    achievement_id = %achievement.id,
                    "grant rejected: already held"
                );
                Err(AwardError::Conflict {
                    learner_id: target.to_string(),
                    achievement_id: achievement.id,
                })
            }
        }
    }

    /// Create an achievement definition. Admin only.
    pub fn create_achievement(
        &self,
        principal: &Principal,
        draft: AchievementDraft,
    ) -> Result<AchievementDefinition, AwardError> {
        principal.require_admin("creating an achievement")?;
        let new = draft.validate()?;
        let created = self.store.insert_achievement(new)?;
        info!(
            created_by = %principal.id,
            achievement_id = %created.id,
            name = %created.name,
            "created achievement"
        );
        Ok(created)
    }

    /// List the catalog, optionally annotated with a learner's status.
    ///
    /// Status is only attached when `include_status` is set; the target
    /// follows the same rules as [`Awarder::evaluate`].
    pub fn catalog(
        &self,
        principal: &Principal,
        learner_id: Option<&str>,
        include_status: bool,
    ) -> Result<Vec<CatalogEntry>, AwardError> {
        if !include_status {
            if learner_id.is_some() {
                principal.resolve_target(learner_id)?;
            }
            let achievements = self.store.list_achievements()?;
            return Ok(achievements.into_iter().map(CatalogEntry::plain).collect());
        }

        let target = principal.resolve_target(learner_id)?;
        let achievements = self.store.list_achievements()?;
        let awards: HashMap<String, AwardRecord> = self
            .store
            .awards_for(target)?
            .into_iter()
            .map(|award| (award.achievement_id.clone(), award))
            .collect();

        Ok(achievements
            .into_iter()
            .map(|achievement| {
                let award = awards.get(&achievement.id);
                CatalogEntry::with_status(achievement, award)
            })
            .collect())
    }
}
