//! Command dispatch through the registered handlers.

use std::collections::HashMap;

use accolade::microsvc::{CommandRequest, HandlerError, Session};
use accolade::AwardError;
use serde_json::json;

use crate::support::{admin, complete_course, create_achievement, instructor, learner, service};

#[test]
fn registers_every_command() {
    let service = service();
    let mut commands = service.commands();
    commands.sort();
    assert_eq!(commands, vec!["catalog.create", "catalog.list", "evaluate", "grant"]);
}

#[test]
fn evaluate_response_shape() {
    let service = service();
    create_achievement(&service, "First Steps", json!({ "type": "course_count", "value": 1 }));
    create_achievement(&service, "Point Collector", json!({ "type": "points", "value": 1000 }));
    complete_course(&service, "learner-1", "rust-101");
    service.repo().store().set_progress("learner-1", 50, 1).unwrap();

    let body = service.dispatch("evaluate", json!({}), learner("learner-1")).unwrap();
    assert_eq!(
        body["snapshot"],
        json!({
            "completedCourseCount": 1,
            "quizPassCount": 0,
            "quizPerfectCount": 0,
            "totalPoints": 50,
            "level": 1
        })
    );
    assert_eq!(body["evaluatedCount"], 2);
    assert_eq!(body["newlyAwarded"].as_array().unwrap().len(), 1);
    assert_eq!(body["newlyAwarded"][0]["name"], "First Steps");

    let body = service.dispatch("evaluate", json!({}), learner("learner-1")).unwrap();
    assert_eq!(body["newlyAwarded"], json!([]));
}

#[test]
fn evaluate_other_learner_requires_elevated_role() {
    let service = service();
    let err = service
        .dispatch("evaluate", json!({ "learnerId": "learner-2" }), learner("learner-1"))
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let body = service
        .dispatch("evaluate", json!({ "learnerId": "learner-2" }), admin())
        .unwrap();
    assert_eq!(body["learnerId"], "learner-2");
}

#[test]
fn unauthenticated_requests_are_rejected() {
    let service = service();
    let err = service.dispatch("evaluate", json!({}), Session::new()).unwrap_err();
    assert!(matches!(err, HandlerError::Award(AwardError::Unauthorized(_))));
    assert_eq!(err.status_code(), 401);

    let err = service
        .dispatch("evaluate", json!({}), Session::for_user("u1", "root"))
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn authentication_is_checked_before_payload() {
    let service = service();
    let err = service.dispatch("grant", json!({}), Session::new()).unwrap_err();
    assert!(matches!(err, HandlerError::Award(AwardError::Unauthorized(_))));
    assert_eq!(err.status_code(), 401);

    let err = service
        .dispatch("catalog.create", json!("not an object"), Session::new())
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    let err = service.dispatch("grant", json!({}), admin()).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn catalog_create_validation() {
    let service = service();

    let err = service
        .dispatch(
            "catalog.create",
            json!({ "criterion": { "type": "points", "value": 5 } }),
            admin(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("name"));

    let err = service
        .dispatch(
            "catalog.create",
            json!({ "name": "Oops", "criterion": { "type": "mystery", "value": 5 } }),
            admin(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("criterion.type"));

    let err = service
        .dispatch(
            "catalog.create",
            json!({ "name": "Nope", "criterion": { "type": "points", "value": 5 } }),
            instructor("teacher-1"),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[test]
fn catalog_list_with_status() {
    let service = service();
    create_achievement(&service, "First Steps", json!({ "type": "course_count", "value": 1 }));
    create_achievement(&service, "Scholar", json!({ "type": "course_count", "value": 5 }));
    complete_course(&service, "learner-1", "rust-101");
    service.dispatch("evaluate", json!({}), learner("learner-1")).unwrap();

    let body = service
        .dispatch("catalog.list", json!({ "includeStatus": true }), learner("learner-1"))
        .unwrap();
    let achievements = body["achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 2);
    assert_eq!(achievements[0]["held"], true);
    assert!(achievements[0]["earnedAt"].is_string());
    assert_eq!(achievements[1]["held"], false);
    assert!(achievements[1].get("earnedAt").is_none());

    let body = service
        .dispatch("catalog.list", json!({}), learner("learner-1"))
        .unwrap();
    assert!(body["achievements"][0].get("held").is_none());
}

#[test]
fn grant_outcomes() {
    let service = service();
    let id = create_achievement(&service, "Legend", json!({ "type": "points", "value": 1_000_000 }));

    let err = service
        .dispatch("grant", json!({ "learnerId": "learner-1" }), admin())
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));

    let body = service
        .dispatch(
            "grant",
            json!({ "achievementId": id, "learnerId": "learner-1" }),
            instructor("teacher-1"),
        )
        .unwrap();
    assert_eq!(body["award"]["learnerId"], "learner-1");
    assert_eq!(body["achievement"]["name"], "Legend");

    let err = service
        .dispatch(
            "grant",
            json!({ "achievementId": id, "learnerId": "learner-1" }),
            instructor("teacher-1"),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    let err = service
        .dispatch(
            "grant",
            json!({ "achievementId": "missing", "learnerId": "learner-1" }),
            admin(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn dispatch_request_round_trip() {
    let service = service();
    let mut vars = HashMap::new();
    vars.insert("x-user-id".to_string(), "learner-9".to_string());
    let response = service.dispatch_request(&CommandRequest {
        command: "evaluate".to_string(),
        input: json!({}),
        session_variables: vars,
    });
    assert_eq!(response.status, 200);
    assert_eq!(response.body["learnerId"], "learner-9");
}
