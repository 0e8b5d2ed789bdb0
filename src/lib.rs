//! accolade — learner progress snapshots and exactly-once achievement awards.
//!
//! Raw activity (completed enrollments, quiz attempts, points and level) is
//! projected into a [`LearnerSnapshot`], matched against the [`Criterion`] of
//! every achievement the learner does not hold yet, and each satisfied
//! achievement is persisted through a conditional insert so that concurrent
//! evaluations of the same learner award it exactly once.

extern crate self as accolade;

mod achievement;
mod activity;
mod awarder;
mod config;
mod criterion;
mod error;
pub mod handlers;
pub mod microsvc;
mod principal;
mod record;
mod snapshot;
mod store;

pub use accolade_macros::Record;
pub use achievement::{AchievementDefinition, AwardRecord, CatalogEntry, NewAchievement};
pub use activity::{Enrollment, EnrollmentStatus, LearnerProgress, QuizAttempt};
pub use awarder::{AchievementDraft, Awarder, Evaluation, Grant};
pub use config::{ConfigError, ServiceConfig};
pub use criterion::{Criterion, CriterionError};
pub use error::AwardError;
pub use principal::{Principal, Role};
pub use record::{composite_key, storage_key, Record};
pub use snapshot::{build_snapshot, LearnerSnapshot, BASE_LEVEL};
pub use store::{ActivityStore, CatalogStore, InMemoryStore, ProgressStore, StoreError};
