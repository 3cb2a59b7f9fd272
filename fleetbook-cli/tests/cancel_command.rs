//! Integration tests for `cancel`, `show` and `delete`.

mod common;

use common::{json_of, TestEnv};
use predicates::prelude::*;

#[test]
fn test_cancel_frees_the_car_and_is_idempotent() {
    let env = TestEnv::new();
    let car = env.add_car("Yaris", "30");
    let booking = env.reserve(1, car, "2024-02-01", "2024-02-04");
    let id = booking["id"].as_i64().unwrap().to_string();

    for _ in 0..2 {
        let output = env
            .as_actor(1)
            .args(["cancel", &id, "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let cancelled = json_of(&output.stdout);
        assert_eq!(cancelled["status"], "Cancelled");
        assert_eq!(cancelled["totalPrice"], booking["totalPrice"]);
    }

    assert_eq!(env.car(car)["available"], true);
}

#[test]
fn test_cancel_of_another_requesters_booking_is_forbidden() {
    let env = TestEnv::new();
    let car = env.add_car("Yaris", "30");
    let booking = env.reserve(1, car, "2024-02-01", "2024-02-04");
    let id = booking["id"].as_i64().unwrap().to_string();

    env.as_actor(2)
        .args(["cancel", &id])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not allowed"));

    env.as_admin().args(["cancel", &id]).assert().success();
}

#[test]
fn test_show_is_limited_to_the_owner() {
    let env = TestEnv::new();
    let car = env.add_car("Yaris", "30");
    let booking = env.reserve(1, car, "2024-02-01", "2024-02-04");
    let id = booking["id"].as_i64().unwrap().to_string();

    env.as_actor(1)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed"));

    env.as_actor(2).args(["show", &id]).assert().code(1);
    env.as_admin().args(["show", &id]).assert().success();
}

#[test]
fn test_show_missing_reservation() {
    let env = TestEnv::new();

    env.as_actor(1)
        .args(["show", "99"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("reservation 99 not found"));
}

#[test]
fn test_delete_requires_privilege_and_recomputes_availability() {
    let env = TestEnv::new();
    let car = env.add_car("Yaris", "30");
    let booking = env.reserve(1, car, "2024-02-01", "2024-02-04");
    let id = booking["id"].as_i64().unwrap().to_string();

    env.as_actor(1)
        .args(["delete", &id])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires --privileged"));

    env.as_admin()
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted reservation"));

    assert_eq!(env.car(car)["available"], true);
    env.as_admin().args(["show", &id]).assert().code(1);
}
