#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cli(roster: &Path) -> Command {
    let mut cmd = Command::cargo_bin("garde-cli").unwrap();
    cmd.arg("--roster").arg(roster);
    cmd
}

fn add_staff(roster: &Path, name: &str) {
    cli(roster)
        .args([
            "add-staff",
            "--name",
            name,
            "--specialty",
            "cardiology",
            "--department",
            "medicine",
        ])
        .assert()
        .success();
}

fn create_shift(roster: &Path, name: &str, date: &str, start: &str, end: &str) -> Command {
    let mut cmd = cli(roster);
    cmd.args([
        "create-shift",
        "--staff",
        name,
        "--ward",
        "ICU",
        "--department",
        "medicine",
        "--date",
        date,
        "--start",
        start,
        "--end",
        end,
        "--type",
        "morning",
    ]);
    cmd
}

#[test]
fn create_then_conflicting_create_fails() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    add_staff(&roster, "Alice Dupont");

    create_shift(&roster, "Alice Dupont", "2024-11-21", "08:00", "16:00")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());

    create_shift(&roster, "Alice Dupont", "2024-11-21", "15:00", "23:00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps"));

    // contact en bordure : accepté
    create_shift(&roster, "Alice Dupont", "2024-11-21", "16:00", "23:59")
        .assert()
        .success();

    cli(&roster)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("no conflicts"));
}

#[test]
fn forced_create_is_reported_by_check() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    add_staff(&roster, "Alice Dupont");
    create_shift(&roster, "Alice Dupont", "2024-11-21", "08:00", "16:00")
        .assert()
        .success();

    let mut forced = create_shift(&roster, "Alice Dupont", "2024-11-21", "12:00", "20:00");
    forced.arg("--force").assert().success();

    cli(&roster)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("1 conflict"));
}

#[test]
fn list_view_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    add_staff(&roster, "Alice Dupont");
    add_staff(&roster, "Bob Martin");
    create_shift(&roster, "Alice Dupont", "2024-11-21", "08:00", "16:00")
        .assert()
        .success();
    create_shift(&roster, "Bob Martin", "2024-11-21", "22:00", "06:00")
        .assert()
        .success();

    cli(&roster)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Dupont"))
        .stdout(predicate::str::contains("22:00–06:00"));

    cli(&roster)
        .args(["view", "--granularity", "week", "--anchor", "2024-11-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-11-18"))
        .stdout(predicate::str::contains("top=22.00 height=8.00"));

    cli(&roster)
        .args([
            "stats",
            "--granularity",
            "week",
            "--anchor",
            "2024-11-21",
            "--staff",
            "dupont",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "total=1 confirmed=0 scheduled=1 distinct_staff=1",
        ));
}

#[test]
fn status_lifecycle_via_cli() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    add_staff(&roster, "Alice Dupont");
    let output = create_shift(&roster, "Alice Dupont", "2024-11-21", "08:00", "16:00")
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();

    cli(&roster)
        .args(["set-status", "--id", &id, "--status", "confirmed"])
        .assert()
        .success();

    // Confirmed -> Scheduled n'existe pas dans la table des transitions
    cli(&roster)
        .args(["set-status", "--id", &id, "--status", "scheduled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status transition"));

    cli(&roster)
        .args(["delete-shift", "--id", &id])
        .assert()
        .success();

    cli(&roster)
        .args(["delete-shift", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shift"));
}

#[test]
fn navigate_clamps_month_end() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args([
            "navigate",
            "--anchor",
            "2024-01-31",
            "--direction",
            "next",
            "--granularity",
            "month",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29"));
}
