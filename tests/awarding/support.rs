//! Shared fixtures: an awarder over the in-memory store, activity helpers,
//! and a store wrapper that can be switched offline.

use std::sync::atomic::{AtomicBool, Ordering};

use accolade::{
    AchievementDefinition, AchievementDraft, ActivityStore, AwardRecord, Awarder, CatalogStore,
    Enrollment, InMemoryStore, LearnerProgress, NewAchievement, Principal, QuizAttempt,
    StoreError,
};
use serde_json::{json, Value};

pub fn awarder() -> Awarder<InMemoryStore> {
    Awarder::new(InMemoryStore::new())
}

pub fn admin() -> Principal {
    Principal::admin("admin-1")
}

pub fn create<S: accolade::ProgressStore>(
    awarder: &Awarder<S>,
    name: &str,
    criterion: Value,
) -> AchievementDefinition {
    awarder
        .create_achievement(
            &admin(),
            AchievementDraft {
                name: Some(name.to_string()),
                criterion: Some(criterion),
                ..Default::default()
            },
        )
        .unwrap()
}

/// Store a definition exactly as given, the way an older tool or a manual
/// database edit might have written it.
pub fn put_raw(store: &InMemoryStore, id: &str, name: &str, criterion: Value) {
    let definition: AchievementDefinition = serde_json::from_value(json!({
        "id": id,
        "name": name,
        "criterion": criterion,
        "createdAt": "2026-01-01T00:00:00Z",
    }))
    .unwrap();
    store.put_achievement(&definition).unwrap();
}

pub fn complete_courses(store: &InMemoryStore, learner: &str, count: usize) {
    for i in 0..count {
        store
            .record_enrollment(Enrollment::completed(learner, format!("course-{i}")))
            .unwrap();
    }
}

pub fn pass_quiz(store: &InMemoryStore, learner: &str, attempt_id: &str, score: u32) {
    store
        .record_quiz_attempt(QuizAttempt {
            id: attempt_id.to_string(),
            learner_id: learner.to_string(),
            quiz_id: format!("quiz-{attempt_id}"),
            score,
            max_score: 100,
            passed: score >= 60,
        })
        .unwrap();
}

pub fn names(definitions: &[AchievementDefinition]) -> Vec<&str> {
    definitions.iter().map(|d| d.name.as_str()).collect()
}

/// In-memory store whose reads or award writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    pub activity_down: AtomicBool,
    pub catalog_down: AtomicBool,
}

impl FlakyStore {
    fn check(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl ActivityStore for FlakyStore {
    fn completed_course_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        Self::check(&self.activity_down)?;
        self.inner.completed_course_count(learner_id)
    }

    fn quiz_pass_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        Self::check(&self.activity_down)?;
        self.inner.quiz_pass_count(learner_id)
    }

    fn quiz_perfect_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        Self::check(&self.activity_down)?;
        self.inner.quiz_perfect_count(learner_id)
    }

    fn progress(&self, learner_id: &str) -> Result<Option<LearnerProgress>, StoreError> {
        Self::check(&self.activity_down)?;
        self.inner.progress(learner_id)
    }
}

impl CatalogStore for FlakyStore {
    fn list_achievements(&self) -> Result<Vec<AchievementDefinition>, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.list_achievements()
    }

    fn list_unheld(&self, learner_id: &str) -> Result<Vec<AchievementDefinition>, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.list_unheld(learner_id)
    }

    fn get_achievement(&self, id: &str) -> Result<Option<AchievementDefinition>, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.get_achievement(id)
    }

    fn insert_achievement(&self, new: NewAchievement) -> Result<AchievementDefinition, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.insert_achievement(new)
    }

    fn insert_award_if_absent(
        &self,
        learner_id: &str,
        achievement_id: &str,
    ) -> Result<Option<AwardRecord>, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.insert_award_if_absent(learner_id, achievement_id)
    }

    fn awards_for(&self, learner_id: &str) -> Result<Vec<AwardRecord>, StoreError> {
        Self::check(&self.catalog_down)?;
        self.inner.awards_for(learner_id)
    }
}
