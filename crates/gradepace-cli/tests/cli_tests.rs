//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gradepace() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("gradepace").unwrap()
}

/// A command isolated from any config or state outside `dir`.
fn gradepace_in(dir: &Path) -> Command {
    let mut cmd = gradepace();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("GRADEPACE_STATE_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn state_path(dir: &TempDir) -> PathBuf {
    dir.path().join("state.json")
}

fn score(dir: &TempDir, subject: &str, assessment: &str, value: &str) {
    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(dir))
        .args(["score", "--subject", subject, "--assessment", assessment, "--value", value])
        .assert()
        .success();
}

#[test]
fn help_output() {
    gradepace()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("target percentage"));
}

#[test]
fn version_output() {
    gradepace()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradepace"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradepace.toml"))
        .stdout(predicate::str::contains("gradepace.json"));

    assert!(dir.path().join("gradepace.toml").exists());
    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("gradepace.json")).unwrap())
            .unwrap();
    assert_eq!(state["targetPct"], 70);
    assert_eq!(state["template"].as_array().unwrap().len(), 5);
    assert_eq!(state["subjects"][0]["name"], "Subject 1");
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path()).arg("init").assert().success();

    gradepace_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn status_without_data_projects_first_assessment() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: 70%"))
        .stdout(predicate::str::contains("Subject 1"))
        .stdout(predicate::str::contains("CIA1"))
        .stdout(predicate::str::contains("11/15"));

    // Reading never creates the state file.
    assert!(!state_path(&dir).exists());
}

#[test]
fn partial_scores_plan_the_rest() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA1", "10");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next: CIA2 needs 18 of 25"))
        .stdout(predicate::str::contains("11 / 15"))
        .stdout(predicate::str::contains("21 / 30"));
}

#[test]
fn shortfall_is_reported_off_track() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA1", "2");
    score(&dir, "Subject 1", "CIA2", "5");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Off Track"))
        .stdout(predicate::str::contains("short by 3"));

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["plan", "--subject", "Subject 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Short by 3 marks"));
}

#[test]
fn full_marks_are_on_track_with_no_plan() {
    let dir = TempDir::new().unwrap();
    for (name, max) in [("CIA1", "15"), ("CIA2", "25"), ("CIA3", "15"), ("CIA4", "30"), ("CP", "15")] {
        score(&dir, "Subject 1", name, max);
    }

    let output = gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["status", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let subject = &report["subjects"][0];
    assert_eq!(subject["status"]["state"], "on");
    assert_eq!(subject["shortfall"]["shortfall"], 0);
    assert!(subject["next"].is_null());
    assert!(subject["plan"]["rows"].as_array().unwrap().is_empty());

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("All assessments scored: final 100.0%"));
}

#[test]
fn overall_is_unweighted_mean_of_subjects() {
    let dir = TempDir::new().unwrap();
    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["subject", "add", "History"])
        .assert()
        .success();
    // 12/15 = 80% and 15/25 = 60%
    score(&dir, "Subject 1", "CIA1", "12");
    score(&dir, "History", "CIA2", "15");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall so far: 70.0%"));
}

#[test]
fn clearing_a_score_makes_it_pending() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA1", "10");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["score", "--subject", "Subject 1", "--assessment", "CIA1", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"))
        .stdout(predicate::str::contains("Next: CIA1 needs 11 of 15"));
}

#[test]
fn negative_score_floors_at_zero() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["score", "--subject", "Subject 1", "--assessment", "CIA1", "--value", "-4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CIA1: 0 / 15"));
}

#[test]
fn strict_config_rejects_over_max() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gradepace.toml"),
        "state_file = \"terms/fall.json\"\nallow_over_max = false\n",
    )
    .unwrap();

    gradepace_in(dir.path())
        .args(["score", "--subject", "Subject 1", "--assessment", "CIA1", "--value", "17"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds max 15"));

    gradepace_in(dir.path())
        .args(["score", "--subject", "Subject 1", "--assessment", "CIA1", "--value", "15"])
        .assert()
        .success();
    assert!(dir.path().join("terms/fall.json").exists());
}

#[test]
fn strict_config_rejects_template_edits_past_max() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gradepace.toml"), "allow_over_max = false\n").unwrap();
    let state = dir.path().join("gradepace.json");

    gradepace_in(dir.path())
        .args(["score", "--subject", "Subject 1", "--assessment", "CIA4", "--value", "30"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(&state).unwrap();

    gradepace_in(dir.path())
        .args(["template", "set-max", "CIA4", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("score 30 exceeds max 10 for 'CIA4'"));

    gradepace_in(dir.path())
        .args([
            "template",
            "replace",
            "--policy",
            "position",
            "--entries",
            "CIA4:30,CIA2:25,CIA3:15,CIA1:15,CP:15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("score 30 exceeds max 15 for 'CIA1'"));

    assert_eq!(std::fs::read_to_string(&state).unwrap(), saved);

    gradepace_in(dir.path())
        .args(["template", "set-max", "CIA4", "40"])
        .assert()
        .success();
}

#[test]
fn status_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["status", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status format: yaml"));
}

#[test]
fn unknown_subject_fails() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["score", "--subject", "Nope", "--assessment", "CIA1", "--value", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: unknown subject: Nope"));
}

#[test]
fn target_must_be_on_grid() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["target", "83"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a multiple of 5"));

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["target", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target set to 80%"));

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("12/15"));
}

#[test]
fn template_edits_apply_to_every_subject() {
    let dir = TempDir::new().unwrap();
    let run = |args: &[&str]| {
        gradepace_in(dir.path())
            .arg("--state")
            .arg(state_path(&dir))
            .args(args)
            .assert()
            .success();
    };

    run(&["subject", "add", "History"]);
    run(&["template", "add", "Viva", "10"]);
    run(&["template", "rename", "CP", "Project"]);
    run(&["template", "set-max", "Viva", "20"]);
    run(&["template", "remove", "CIA3"]);

    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(state_path(&dir)).unwrap()).unwrap();
    let names: Vec<&str> = state["template"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["CIA1", "CIA2", "CIA4", "Project", "Viva"]);
    for subject in state["subjects"].as_array().unwrap() {
        assert_eq!(subject["assessments"].as_array().unwrap().len(), 5);
        assert_eq!(subject["assessments"][4]["max"], 20);
    }

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["template", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 105"));
}

#[test]
fn template_replace_keeps_scores_by_name() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA2", "20");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["template", "replace", "--entries", "CIA2:25,Final:75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scores matched by name"));

    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(state_path(&dir)).unwrap()).unwrap();
    let assessments = &state["subjects"][0]["assessments"];
    assert_eq!(assessments[0]["name"], "CIA2");
    assert_eq!(assessments[0]["score"], 20.0);
    assert!(assessments[1]["score"].is_null());
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA1", "18");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("above max"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_migrates_legacy_document() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        state_path(&dir),
        r#"{"targetPct": 75, "subjects": [{"name": "Maths", "assessments": [{"score": "12"}]}]}"#,
    )
    .unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy document"))
        .stdout(predicate::str::contains("State valid."));
}

#[test]
fn malformed_state_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(state_path(&dir), "{ not json").unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn report_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    score(&dir, "Subject 1", "CIA1", "10");
    let out = dir.path().join("reports");

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["report", "--format", "all", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.html"));

    assert!(out.join("report.html").exists());
    assert!(out.join("report.json").exists());
    assert!(out.join("report.md").exists());
}

#[test]
fn report_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    gradepace_in(dir.path())
        .arg("--state")
        .arg(state_path(&dir))
        .args(["report", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report format"));
}
