//! Concurrent evaluations of the same learner must award each achievement once.

use std::sync::{Arc, Barrier};
use std::thread;

use accolade::{CatalogStore, Principal};
use serde_json::json;

use crate::support::{awarder, complete_courses, create};

#[test]
fn racing_evaluations_award_exactly_once() {
    const WORKERS: usize = 16;

    let awarder = awarder();
    let first_steps = create(&awarder, "First Steps", json!({ "type": "course_count", "value": 1 }));
    let starter = create(&awarder, "Starter", json!({ "type": "points", "value": 0 }));
    complete_courses(awarder.store(), "learner-1", 1);

    let awarder = Arc::new(awarder);
    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let awarder = Arc::clone(&awarder);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                awarder
                    .evaluate(&Principal::learner("learner-1"), None)
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for achievement in [&first_steps, &starter] {
        let reported = results
            .iter()
            .flat_map(|r| r.newly_awarded.iter())
            .filter(|a| a.id == achievement.id)
            .count();
        assert_eq!(reported, 1, "{} reported {} times", achievement.name, reported);
    }

    let awards = awarder.store().awards_for("learner-1").unwrap();
    assert_eq!(awards.len(), 2);
}

#[test]
fn concurrent_learners_do_not_interfere() {
    let awarder = awarder();
    create(&awarder, "Starter", json!({ "type": "points", "value": 0 }));
    let awarder = Arc::new(awarder);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let awarder = Arc::clone(&awarder);
            thread::spawn(move || {
                let learner = Principal::learner(format!("learner-{i}"));
                awarder.evaluate(&learner, None).unwrap().newly_awarded.len()
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 8);
}
