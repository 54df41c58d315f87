use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn hohmann_report_is_printed() {
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args(["hohmann", "--r-initial-km", "7000", "--r-final-km", "42164"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results of the Hohmann transfer"))
        .stdout(predicate::str::contains("Delta-V total"));
}

#[test]
fn infeasible_true_anomaly_exits_non_zero() {
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "one-tangent",
            "--r-initial-km",
            "7000",
            "--r-final-km",
            "70000",
            "--nu-deg",
            "90",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("infeasible"));
}

#[test]
fn mu_override_and_json_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json_path = dir.path().join("bi.json");
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "--mu",
            "3.986e14",
            "bi-elliptic",
            "--r-initial-km",
            "7000",
            "--r-final-km",
            "140000",
            "--json",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("intermediate burn"));
    let json = fs::read_to_string(&json_path).expect("json output");
    assert!(json.contains("\"kind\": \"bi_elliptic\""));
    assert!(json.contains("\"generated_utc\""));
}

#[test]
fn sweep_csv_feeds_the_plotter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("sweep.csv");
    let png_path = dir.path().join("sweep.png");

    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "sweep",
            "--samples",
            "50",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bi-elliptic cheaper from"));

    Command::cargo_bin("transfer_plot")
        .expect("transfer_plot bin")
        .args([
            "--width",
            "400",
            "--height",
            "300",
            "sweep",
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn scenario_plot_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("plots").join("one_tangent.png");

    Command::cargo_bin("transfer_plot")
        .expect("transfer_plot bin")
        .args([
            "--width",
            "400",
            "--height",
            "400",
            "scenario",
            "--name",
            "one_tangent",
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn scenario_command_writes_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "scenario",
            "--name",
            "leo_geo_hohmann",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== leo_geo_hohmann (hohmann) ==="));
    assert!(dir.path().join("leo_geo_hohmann.json").exists());

    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args(["scenario", "--name", "missing"])
        .assert()
        .failure();
}

#[test]
fn scenario_honours_mu_and_rejects_body() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "--mu",
            "1.0e10",
            "scenario",
            "--name",
            "leo_geo_hohmann",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success();
    let json = fs::read_to_string(dir.path().join("leo_geo_hohmann.json")).expect("json output");
    assert!(json.contains("\"mu_m3_s2\": 10000000000.0"), "{json}");

    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args(["--body", "MOON", "scenario", "--name", "leo_geo_hohmann"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--body MOON does not apply to scenarios"));
}
