//! End-to-end booking flows through the CLI.

mod common;

use common::{TestEnv, PASSENGER_ID};
use predicates::prelude::*;

#[test]
fn test_book_modify_scenario() {
    let env = TestEnv::new().with_inventory();

    let id = env.book("A1", "ana@example.com", "250.00");
    assert_eq!(id, 1);

    let moved = env.json(&[
        "modify",
        &id.to_string(),
        "--seat",
        "A2",
        "--identifier",
        "1234-56789-0101",
    ]);
    assert_eq!(moved["total_price"].as_f64(), Some(275.0));
    assert_eq!(moved["seat_id"], "A2");
    assert_eq!(moved["modifications"][0]["surcharge"].as_f64(), Some(25.0));
    assert_eq!(
        moved["modifications"][0]["description"],
        "Changed from A1 to A2"
    );

    let seats = env.json(&["seat", "list", "--free"]);
    let free: Vec<_> = seats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(free, vec!["A1", "B1"]);

    assert_eq!(env.outbox_kinds(), vec!["user_registered", "modification"]);
}

#[test]
fn test_book_human_output() {
    let env = TestEnv::new().with_inventory();

    env.command()
        .args(["book", "A1", "--user", "ana@example.com", "--passenger", "Ana"])
        .args(["--identifier", PASSENGER_ID, "--price", "99.5", "--baggage"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("total 99.50"));
}

#[test]
fn test_loyalty_discount_after_threshold() {
    let env = TestEnv::new();
    env.write_config("pricing:\n  vip_threshold: 2\n");
    for seat in ["A1", "A2", "A3"] {
        env.add_seat(seat, "economy");
    }
    env.add_user("ana@example.com", "Ana");

    env.book("A1", "ana@example.com", "100");
    env.book("A2", "ana@example.com", "100");
    let third = env.book("A3", "ana@example.com", "100");

    let shown = env.json(&["show", &third.to_string()]);
    assert_eq!(shown["reservation"]["total_price"].as_f64(), Some(90.0));
    assert_eq!(shown["seat"]["class"], "economy");
}

#[test]
fn test_cancel_frees_seat_and_is_idempotent() {
    let env = TestEnv::new().with_inventory();
    let id = env.book("A1", "ana@example.com", "50").to_string();

    env.command()
        .args(["cancel", &id, "--identifier", PASSENGER_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains("seat A1 is free"));

    env.command()
        .args(["cancel", &id, "--identifier", PASSENGER_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains("already cancelled"));

    assert_eq!(
        env.outbox_kinds(),
        vec!["user_registered", "cancellation"]
    );

    // The seat can be booked again.
    env.book("A1", "ana@example.com", "50");
}

#[test]
fn test_confirm_batch_and_list() {
    let env = TestEnv::new().with_inventory();
    env.add_user("ben@example.com", "Ben Ortiz");
    let first = env.book("A1", "ben@example.com", "100").to_string();
    let second = env.book("A2", "ana@example.com", "20.25").to_string();

    let batch = env.json(&["confirm-batch", &first, &second]);
    assert_eq!(batch["confirmed"], 2);
    assert_eq!(batch["combined_total"].as_f64(), Some(120.25));

    // Confirming again inside the dedup window of the same process would be
    // suppressed; a new process starts with an empty window.
    env.command().args(["confirm", &first]).assert().success();

    let confirmed = env.json(&["list", "--state", "confirmed"]);
    assert_eq!(confirmed.as_array().unwrap().len(), 2);

    let bens = env.json(&["list", "--user", "ben@example.com"]);
    assert_eq!(bens.as_array().unwrap().len(), 1);

    let outbox = std::fs::read_to_string(env.data_file("outbox.jsonl")).unwrap();
    let batch_line = outbox
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
        .find(|v| v["kind"] == "batch_confirmation")
        .unwrap();
    assert_eq!(batch_line["recipient"]["email"], "ben@example.com");
    assert_eq!(batch_line["recipient"]["display_name"], "Ben Ortiz");
    assert_eq!(batch_line["snapshots"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_csv() {
    let env = TestEnv::new().with_inventory();
    env.book("B1", "ana@example.com", "400");

    env.command()
        .args(["list", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,state,user,seat,passenger,base_price,total_price,created_at\n",
        ))
        .stdout(predicate::str::contains("1,active,ana@example.com,B1,Ana Lopez,400.00,400.00,"));
}

#[test]
fn test_dry_run_changes_nothing() {
    let env = TestEnv::new().with_inventory();
    let id = env.book("A1", "ana@example.com", "250").to_string();

    env.command()
        .args(["modify", &id, "--seat", "A2", "--identifier", PASSENGER_ID, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Move reservation 1 to seat A2 with total 275.00"));

    let shown = env.json(&["show", &id]);
    assert_eq!(shown["reservation"]["seat_id"], "A1");
    assert_eq!(shown["reservation"]["total_price"].as_f64(), Some(250.0));
}

#[test]
fn test_report() {
    let env = TestEnv::new().with_inventory();
    env.book("A1", "ana@example.com", "10");

    let report = env.json(&["report"]);
    assert_eq!(report["users_registered"], 1);
    assert_eq!(report["occupancy"]["economy"]["occupied"], 1);
    assert_eq!(report["occupancy"]["economy"]["free"], 1);
    assert_eq!(report["occupancy"]["business"]["free"], 1);

    env.command()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("economy: 1 occupied, 1 free"));
}

#[test]
fn test_log_sink_writes_no_outbox() {
    let env = TestEnv::new();
    env.write_config("notifications:\n  sink: log\n");
    env.add_user("ana@example.com", "Ana");

    assert!(!env.data_file("outbox.jsonl").exists());
}
