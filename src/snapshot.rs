//! Learner snapshots - a point-in-time projection of one learner's activity.
//!
//! A snapshot is rebuilt on every evaluation and never persisted. Every
//! count comes from an aggregate read against the [`ActivityStore`]; if any
//! read fails the whole build fails, so evaluation never runs against
//! spuriously-low counts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{ActivityStore, StoreError};

/// Level assigned to learners with no recorded progress.
pub const BASE_LEVEL: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerSnapshot {
    pub completed_course_count: u64,
    pub quiz_pass_count: u64,
    pub quiz_perfect_count: u64,
    pub total_points: u64,
    pub level: u32,
}

impl LearnerSnapshot {
    /// Snapshot of a learner with no activity at all.
    pub fn empty() -> Self {
        Self {
            completed_course_count: 0,
            quiz_pass_count: 0,
            quiz_perfect_count: 0,
            total_points: 0,
            level: BASE_LEVEL,
        }
    }
}

impl Default for LearnerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Build a snapshot for `learner_id`.
///
/// Learners the store has never heard of get [`LearnerSnapshot::empty`].
/// A stored level of zero is clamped to [`BASE_LEVEL`].
pub fn build_snapshot<S>(store: &S, learner_id: &str) -> Result<LearnerSnapshot, StoreError>
where
    S: ActivityStore + ?Sized,
{
    let completed_course_count = store.completed_course_count(learner_id)?;
    let quiz_pass_count = store.quiz_pass_count(learner_id)?;
    let quiz_perfect_count = store.quiz_perfect_count(learner_id)?;
    let (total_points, level) = match store.progress(learner_id)? {
        Some(progress) => (progress.total_points, progress.level.max(BASE_LEVEL)),
        None => (0, BASE_LEVEL),
    };

    let snapshot = LearnerSnapshot {
        completed_course_count,
        quiz_pass_count,
        quiz_perfect_count,
        total_points,
        level,
    };
    debug!(learner_id, ?snapshot, "built learner snapshot");
    Ok(snapshot)
}
