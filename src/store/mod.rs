//! Storage collaborators for the achievement core.
//!
//! Two narrow traits split the persistence contract:
//!
//! - [`ActivityStore`] answers aggregate count queries over activity that
//!   other parts of the application write.
//! - [`CatalogStore`] owns achievement definitions and award records, and is
//!   the only place uniqueness of `(learner, achievement)` is enforced.
//!
//! Implementations must make [`CatalogStore::insert_award_if_absent`] a
//! single conditional write (a unique constraint with a conflict-ignoring
//! insert, or a compare-and-swap against a keyed store). Read-then-write
//! reintroduces the race this contract exists to close.

mod in_memory;

use std::fmt;

use crate::activity::LearnerProgress;
use crate::achievement::{AchievementDefinition, AwardRecord, NewAchievement};

pub use in_memory::InMemoryStore;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or was inconsistent mid-read.
    Unavailable(String),
    /// A stored row could not be encoded or decoded.
    Serde(String),
    /// An unconditional insert hit an existing key.
    Duplicate { collection: String, key: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
            StoreError::Duplicate { collection, key } => {
                write!(f, "duplicate key {}:{}", collection, key)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Aggregate reads over a learner's activity. Each method is one set-based
/// count, never a scan of raw history in application memory.
pub trait ActivityStore: Send + Sync {
    /// Enrollments in the terminal `completed` state.
    fn completed_course_count(&self, learner_id: &str) -> Result<u64, StoreError>;

    /// Quiz attempts marked passed.
    fn quiz_pass_count(&self, learner_id: &str) -> Result<u64, StoreError>;

    /// Quiz attempts that scored the maximum possible score.
    fn quiz_perfect_count(&self, learner_id: &str) -> Result<u64, StoreError>;

    /// Points and level maintained by the external points policy, if any.
    fn progress(&self, learner_id: &str) -> Result<Option<LearnerProgress>, StoreError>;
}

/// Achievement catalog and award records.
pub trait CatalogStore: Send + Sync {
    /// All definitions, in insertion order.
    fn list_achievements(&self) -> Result<Vec<AchievementDefinition>, StoreError>;

    /// Definitions the learner does not hold yet, computed in one pass.
    fn list_unheld(&self, learner_id: &str) -> Result<Vec<AchievementDefinition>, StoreError>;

    fn get_achievement(&self, id: &str) -> Result<Option<AchievementDefinition>, StoreError>;

    /// Insert a definition, assigning its id and creation time.
    fn insert_achievement(&self, new: NewAchievement) -> Result<AchievementDefinition, StoreError>;

    /// Create the award if no record exists for the pair.
    ///
    /// Returns `Some(record)` when this call created the row and `None` when a
    /// record already existed. `earned_at` is stamped at insertion.
    fn insert_award_if_absent(
        &self,
        learner_id: &str,
        achievement_id: &str,
    ) -> Result<Option<AwardRecord>, StoreError>;

    /// Every award the learner holds.
    fn awards_for(&self, learner_id: &str) -> Result<Vec<AwardRecord>, StoreError>;
}

/// Everything the awarder needs from persistence.
pub trait ProgressStore: ActivityStore + CatalogStore {}

impl<S: ActivityStore + CatalogStore> ProgressStore for S {}
