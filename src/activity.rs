//! Activity rows owned by the surrounding application.
//!
//! The achievement core only ever counts these. They exist here so the
//! in-memory store has something to aggregate over.

use serde::{Deserialize, Serialize};

use crate::Record;

/// Lifecycle of a course enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
}

/// A learner's enrollment in a course.
#[derive(Debug, Clone, Serialize, Deserialize, Record)]
#[record(collection = "enrollments")]
pub struct Enrollment {
    #[record(key)]
    pub learner_id: String,
    #[record(key)]
    pub course_id: String,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    pub fn completed(learner_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            course_id: course_id.into(),
            status: EnrollmentStatus::Completed,
        }
    }

    pub fn active(learner_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            course_id: course_id.into(),
            status: EnrollmentStatus::Active,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }
}

/// One attempt at a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, Record)]
#[record(collection = "quiz_attempts")]
pub struct QuizAttempt {
    pub id: String,
    pub learner_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub max_score: u32,
    pub passed: bool,
}

impl QuizAttempt {
    /// A perfect attempt scored the maximum possible. Quizzes with no
    /// scorable questions never count as perfect.
    pub fn is_perfect(&self) -> bool {
        self.max_score > 0 && self.score >= self.max_score
    }
}

/// Points and level as maintained by the external points policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "learner_progress")]
pub struct LearnerProgress {
    #[record(key)]
    pub learner_id: String,
    pub total_points: u64,
    pub level: u32,
}
