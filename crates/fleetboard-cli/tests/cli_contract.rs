use assert_cmd::Command;
use std::path::Path;
use tempfile::tempdir;

fn seed_snapshots(dir: &Path) {
    std::fs::write(
        dir.join("dashboard-meta.json"),
        r#"{"lastUpdated": 1700000000, "consoleDomain": "eu-west-1.console.aws.amazon.com"}"#,
    )
    .expect("write meta");
    std::fs::write(
        dir.join("repositories.json"),
        r#"{
            "svc-alpha": ["svc-alpha", ["platform"], 2, 0, ["dev", "int"], [{"Pull Request ID": "41", "Title": "retry harder"}]],
            "svc-beta": ["svc-beta", [], 0, 0, ["dev"], []]
        }"#,
    )
    .expect("write repositories");
    std::fs::write(dir.join("coverage.json"), r#"{"svc-alpha": [81, 74]}"#)
        .expect("write coverage");
    std::fs::write(
        dir.join("unit_tests.json"),
        r#"{"svc-alpha": [[10, 2, 1, 13]]}"#,
    )
    .expect("write unit tests");
    std::fs::write(
        dir.join("pipelines.json"),
        r#"{"svc-alpha": [{"svc-alpha-build": "Succeeded"}]}"#,
    )
    .expect("write pipelines");
}

fn fleetboard() -> Command {
    Command::cargo_bin("fleetboard").expect("binary")
}

#[test]
fn render_prints_an_aligned_table_with_derived_cells() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());

    let assert = fleetboard()
        .args(["render", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("Data Last Refreshed:"));
    assert!(stdout.contains("Repository Name"));
    assert!(stdout.contains("svc-alpha"));
    assert!(stdout.contains("10 / 2 / 1 / 13"));
    assert!(stdout.contains("N/A"), "svc-beta has no coverage data");
}

#[test]
fn render_json_emits_columns_rows_and_degradations() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());
    std::fs::remove_file(dir.path().join("coverage.json")).expect("remove coverage");

    let assert = fleetboard()
        .args(["render", "--json", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(payload["columns"].as_array().expect("columns").len(), 10);
    assert_eq!(payload["rows"].as_array().expect("rows").len(), 2);
    assert_eq!(
        payload["degraded_sources"][0]["source"],
        serde_json::json!("coverage")
    );
}

#[test]
fn render_honors_a_custom_coverage_threshold() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());

    let assert = fleetboard()
        .args(["render", "--json", "--coverage-threshold", "90", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    // 81% line coverage is healthy at 75 but needs attention at 90.
    assert!(stdout.contains("needs_attention"));
}

#[test]
fn validate_passes_a_clean_snapshot_directory() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());

    fleetboard()
        .args(["validate", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicates_contains("ok: all snapshot documents"));
}

#[test]
fn validate_fails_on_a_three_count_unit_test_tuple() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());
    std::fs::write(
        dir.path().join("unit_tests.json"),
        r#"{"svc-alpha": [[10, 2, 1]]}"#,
    )
    .expect("write malformed unit tests");

    fleetboard()
        .args(["validate", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .code(3);
}

#[test]
fn validate_fails_on_a_supplement_arity_breach() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());
    std::fs::write(dir.path().join("coverage.json"), r#"{"svc-alpha": [81]}"#)
        .expect("write short coverage tuple");

    fleetboard()
        .args(["validate", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .code(3);
}

#[test]
fn validate_tolerates_absent_sources() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());
    std::fs::remove_file(dir.path().join("coverage.json")).expect("remove coverage");

    fleetboard()
        .args(["validate", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn meta_reports_the_freshness_banner() {
    let dir = tempdir().expect("tempdir");
    seed_snapshots(dir.path());

    fleetboard()
        .args(["meta", "--snapshot-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicates_contains("Data Last Refreshed:"));
}

fn predicates_contains(needle: &str) -> impl predicates::Predicate<str> {
    predicates::str::contains(needle.to_string())
}
