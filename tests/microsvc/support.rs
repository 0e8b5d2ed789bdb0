//! Shared fixtures for command dispatch tests.

use accolade::microsvc::{Service, Session};
use accolade::{handlers, Awarder, Enrollment, InMemoryStore};
use serde_json::{json, Value};

pub type AchievementService = Service<Awarder<InMemoryStore>>;

pub fn service() -> AchievementService {
    handlers::service(InMemoryStore::new())
}

pub fn learner(id: &str) -> Session {
    Session::for_user(id, "learner")
}

pub fn instructor(id: &str) -> Session {
    Session::for_user(id, "instructor")
}

pub fn admin() -> Session {
    Session::for_user("admin-1", "admin")
}

pub fn create_achievement(service: &AchievementService, name: &str, criterion: Value) -> String {
    let created = service
        .dispatch(
            "catalog.create",
            json!({ "name": name, "criterion": criterion }),
            admin(),
        )
        .unwrap();
    created["id"].as_str().unwrap().to_string()
}

pub fn complete_course(service: &AchievementService, learner: &str, course: &str) {
    service
        .repo()
        .store()
        .record_enrollment(Enrollment::completed(learner, course))
        .unwrap();
}
