//! Direct grants bypass criteria but not uniqueness.

use accolade::{AwardError, CatalogStore, Principal};
use serde_json::json;

use crate::support::{awarder, create, names, put_raw};

#[test]
fn instructor_grants_unmet_achievement() {
    let awarder = awarder();
    let hard = create(&awarder, "Legend", json!({ "type": "points", "value": 1_000_000 }));

    let grant = awarder
        .grant(&Principal::instructor("teacher-1"), &hard.id, Some("learner-1"))
        .unwrap();
    assert_eq!(grant.achievement.name, "Legend");
    assert_eq!(grant.award.learner_id, "learner-1");

    let later = awarder.evaluate(&Principal::learner("learner-1"), None).unwrap();
    assert_eq!(later.evaluated_count, 0);
    assert!(later.newly_awarded.is_empty());
}

#[test]
fn second_grant_conflicts_while_evaluation_stays_silent() {
    let awarder = awarder();
    let starter = create(&awarder, "Starter", json!({ "type": "points", "value": 0 }));
    let learner = Principal::learner("learner-1");

    assert_eq!(awarder.evaluate(&learner, None).unwrap().newly_awarded.len(), 1);

    let err = awarder
        .grant(&Principal::admin("admin-1"), &starter.id, Some("learner-1"))
        .unwrap_err();
    assert!(matches!(err, AwardError::Conflict { .. }));
    assert_eq!(err.status_code(), 409);
    assert_eq!(awarder.store().awards_for("learner-1").unwrap().len(), 1);
}

#[test]
fn unknown_achievement_is_not_found() {
    let awarder = awarder();
    let err = awarder
        .grant(&Principal::admin("admin-1"), "nope", Some("learner-1"))
        .unwrap_err();
    assert_eq!(
        err,
        AwardError::NotFound {
            kind: "achievement",
            id: "nope".into()
        }
    );
}

#[test]
fn learners_cannot_grant_even_to_themselves() {
    let awarder = awarder();
    let starter = create(&awarder, "Starter", json!({ "type": "points", "value": 0 }));
    let err = awarder
        .grant(&Principal::learner("learner-1"), &starter.id, None)
        .unwrap_err();
    assert!(matches!(err, AwardError::Forbidden(_)));
    assert!(awarder.store().awards_for("learner-1").unwrap().is_empty());
}

#[test]
fn ids_containing_separator_are_independent() {
    let awarder = awarder();
    put_raw(awarder.store(), "5:gold", "Five Gold", json!({ "type": "points", "value": 0 }));
    put_raw(awarder.store(), "gold", "Gold", json!({ "type": "points", "value": 0 }));

    awarder
        .grant(&Principal::admin("admin-1"), "gold", Some("ann:5"))
        .unwrap();

    let ann = awarder.evaluate(&Principal::learner("ann"), None).unwrap();
    assert_eq!(ann.evaluated_count, 2);
    assert_eq!(names(&ann.newly_awarded), vec!["Five Gold", "Gold"]);
    assert_eq!(awarder.store().awards_for("ann").unwrap().len(), 2);
    assert_eq!(awarder.store().awards_for("ann:5").unwrap().len(), 1);
}
