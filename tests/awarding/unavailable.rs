//! Store outages surface as a single retryable error, never a partial result.

use std::sync::atomic::Ordering;

use accolade::{AwardError, Awarder, CatalogStore, Principal};
use serde_json::json;

use crate::support::{complete_courses, create, FlakyStore};

#[test]
fn activity_outage_fails_before_any_award() {
    let awarder = Awarder::new(FlakyStore::default());
    create(&awarder, "Starter", json!({ "type": "points", "value": 0 }));
    awarder.store().activity_down.store(true, Ordering::SeqCst);

    let err = awarder
        .evaluate(&Principal::learner("learner-1"), None)
        .unwrap_err();
    assert!(matches!(err, AwardError::DataUnavailable(_)));
    assert!(err.is_retryable());
    assert_eq!(err.status_code(), 503);
    assert!(awarder.store().inner.awards_for("learner-1").unwrap().is_empty());
}

#[test]
fn retry_after_recovery_awards() {
    let awarder = Awarder::new(FlakyStore::default());
    create(&awarder, "First Steps", json!({ "type": "course_count", "value": 1 }));
    complete_courses(&awarder.store().inner, "learner-1", 1);

    awarder.store().catalog_down.store(true, Ordering::SeqCst);
    assert!(awarder.evaluate(&Principal::learner("learner-1"), None).is_err());

    awarder.store().catalog_down.store(false, Ordering::SeqCst);
    let result = awarder.evaluate(&Principal::learner("learner-1"), None).unwrap();
    assert_eq!(result.newly_awarded.len(), 1);
}
