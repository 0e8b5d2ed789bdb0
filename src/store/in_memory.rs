//! InMemoryStore - HashMap-backed store for testing and development.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{ActivityStore, CatalogStore, StoreError};
use crate::activity::{Enrollment, LearnerProgress, QuizAttempt};
use crate::achievement::{AchievementDefinition, AwardRecord, NewAchievement};
use crate::record::{storage_key, Record};

/// Internal stored representation of a record.
struct StoredRecord {
    bytes: Vec<u8>,
    /// Insertion order across all collections.
    seq: u64,
}

#[derive(Default)]
struct Tables {
    rows: HashMap<String, StoredRecord>,
    next_seq: u64,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// In-memory store implementing both [`ActivityStore`] and [`CatalogStore`].
///
/// Storage key is `"COLLECTION:key"`. Clone-friendly via Arc; clones share
/// the same tables. Every conditional write happens under a single write
/// lock acquisition, which is what makes awards unique.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    /// Get a record by key.
    pub fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        let tables = self.read()?;
        match tables.rows.get(&storage_key::<R>(key)) {
            Some(stored) => Ok(Some(serde_json::from_slice(&stored.bytes)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a record. Replacing keeps the original position.
    pub fn upsert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let key = record.storage_key();
        let bytes = serde_json::to_vec(record)?;
        let mut tables = self.write()?;
        let existing = tables.rows.get(&key).map(|stored| stored.seq);
        let seq = match existing {
            Some(seq) => seq,
            None => tables.next_seq(),
        };
        tables.rows.insert(key, StoredRecord { bytes, seq });
        Ok(())
    }

    /// Insert a new record. Fails with `Duplicate` if the key exists.
    pub fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        if self.insert_if_absent(record)? {
            Ok(())
        } else {
            Err(StoreError::Duplicate {
                collection: R::COLLECTION.to_string(),
                key: record.key(),
            })
        }
    }

    /// Insert a record only if its key is free. Returns whether it was written.
    pub fn insert_if_absent<R: Record>(&self, record: &R) -> Result<bool, StoreError> {
        let key = record.storage_key();
        let bytes = serde_json::to_vec(record)?;
        let mut tables = self.write()?;
        if tables.rows.contains_key(&key) {
            return Ok(false);
        }
        let seq = tables.next_seq();
        tables.rows.insert(key, StoredRecord { bytes, seq });
        Ok(true)
    }

    /// Records of one collection matching a predicate, in insertion order.
    ///
    /// A row that fails to decode fails the whole read.
    pub fn find<R: Record>(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let tables = self.read()?;
        Self::find_in(&tables, predicate)
    }

    /// Count records of one collection matching a predicate.
    pub fn count<R: Record>(&self, predicate: &dyn Fn(&R) -> bool) -> Result<u64, StoreError> {
        let tables = self.read()?;
        let prefix = format!("{}:", R::COLLECTION);
        let mut count = 0;
        for (key, stored) in tables.rows.iter() {
            if key.starts_with(&prefix) {
                let record: R = serde_json::from_slice(&stored.bytes)?;
                if predicate(&record) {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    fn find_in<R: Record>(
        tables: &Tables,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<R>, StoreError> {
        let prefix = format!("{}:", R::COLLECTION);
        let mut results = Vec::new();
        for (key, stored) in tables.rows.iter() {
            if key.starts_with(&prefix) {
                let record: R = serde_json::from_slice(&stored.bytes)?;
                if predicate(&record) {
                    results.push((stored.seq, record));
                }
            }
        }
        results.sort_by_key(|(seq, _)| *seq);
        Ok(results.into_iter().map(|(_, record)| record).collect())
    }

    /// Record or update an enrollment (keyed by learner and course).
    pub fn record_enrollment(&self, enrollment: Enrollment) -> Result<(), StoreError> {
        self.upsert(&enrollment)
    }

    /// Record a quiz attempt. Attempt ids must be unique.
    pub fn record_quiz_attempt(&self, attempt: QuizAttempt) -> Result<(), StoreError> {
        self.insert(&attempt)
    }

    /// Replace a learner's points and level, as the external points policy would.
    pub fn set_progress(
        &self,
        learner_id: &str,
        total_points: u64,
        level: u32,
    ) -> Result<(), StoreError> {
        self.upsert(&LearnerProgress {
            learner_id: learner_id.to_string(),
            total_points,
            level,
        })
    }

    /// Store a definition as-is, bypassing id assignment. Used to seed
    /// catalogs that were written by other tools.
    pub fn put_achievement(&self, definition: &AchievementDefinition) -> Result<(), StoreError> {
        self.insert(definition)
    }
}

impl ActivityStore for InMemoryStore {
    fn completed_course_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        self.count::<Enrollment>(&|e| e.learner_id == learner_id && e.is_completed())
    }

    fn quiz_pass_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        self.count::<QuizAttempt>(&|a| a.learner_id == learner_id && a.passed)
    }

    fn quiz_perfect_count(&self, learner_id: &str) -> Result<u64, StoreError> {
        self.count::<QuizAttempt>(&|a| a.learner_id == learner_id && a.is_perfect())
    }

    fn progress(&self, learner_id: &str) -> Result<Option<LearnerProgress>, StoreError> {
        self.get::<LearnerProgress>(learner_id)
    }
}

impl CatalogStore for InMemoryStore {
    fn list_achievements(&self) -> Result<Vec<AchievementDefinition>, StoreError> {
        self.find::<AchievementDefinition>(&|_| true)
    }

    fn list_unheld(&self, learner_id: &str) -> Result<Vec<AchievementDefinition>, StoreError> {
        let tables = self.read()?;
        let held: HashSet<String> =
            Self::find_in::<AwardRecord>(&tables, &|a| a.learner_id == learner_id)?
                .into_iter()
                .map(|a| a.achievement_id)
                .collect();
        Self::find_in::<AchievementDefinition>(&tables, &|d| !held.contains(&d.id))
    }

    fn get_achievement(&self, id: &str) -> Result<Option<AchievementDefinition>, StoreError> {
        self.get::<AchievementDefinition>(id)
    }

    fn insert_achievement(&self, new: NewAchievement) -> Result<AchievementDefinition, StoreError> {
        let mut tables = self.write()?;
        // Seeded definitions may already occupy a numeric id.
        let mut seq = tables.next_seq();
        while tables
            .rows
            .contains_key(&storage_key::<AchievementDefinition>(&seq.to_string()))
        {
            seq = tables.next_seq();
        }
        let definition = AchievementDefinition {
            id: seq.to_string(),
            name: new.name,
            description: new.description,
            icon_ref: new.icon_ref,
            criterion: new.criterion,
            created_at: Utc::now(),
        };
        let bytes = serde_json::to_vec(&definition)?;
        tables
            .rows
            .insert(definition.storage_key(), StoredRecord { bytes, seq });
        Ok(definition)
    }

    fn insert_award_if_absent(
        &self,
        learner_id: &str,
        achievement_id: &str,
    ) -> Result<Option<AwardRecord>, StoreError> {
        let award = AwardRecord {
            learner_id: learner_id.to_string(),
            achievement_id: achievement_id.to_string(),
            earned_at: Utc::now(),
        };
        let key = award.storage_key();
        let bytes = serde_json::to_vec(&award)?;
        let mut tables = self.write()?;
        if tables.rows.contains_key(&key) {
            return Ok(None);
        }
        let seq = tables.next_seq();
        tables.rows.insert(key, StoredRecord { bytes, seq });
        Ok(Some(award))
    }

    fn awards_for(&self, learner_id: &str) -> Result<Vec<AwardRecord>, StoreError> {
        self.find::<AwardRecord>(&|a| a.learner_id == learner_id)
    }
}
