//! E2E tests for the simulate, categories and schema commands

use assert_fs::prelude::*;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

fn decimal(value: &serde_json::Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

/// Flat-rate example: services, 15%, separate management
#[test]
fn simulate_text_output() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate", "--revenue", "50000", "--costs", "15000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TAX SIMULATION"))
        .stdout(predicate::str::contains("Forfetario"))
        .stdout(predicate::str::contains("Ordinario"))
        .stdout(predicate::str::contains("€39000.00"))
        .stdout(predicate::str::contains("€10167.30"))
        .stdout(predicate::str::contains("€35507.80"))
        .stdout(predicate::str::contains("RECOMMENDED: Forfetario"));
}

#[test]
fn simulate_json_output() {
    let output = assert_cmd::cargo_bin_cmd!("taxami")
        .args([
            "simulate",
            "--revenue",
            "50000",
            "--costs",
            "15000",
            "--scheme",
            "artisans-traders",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let ordinario = &report["ordinario"];
    assert_eq!(decimal(&ordinario["taxable_income"]), dec!(35000));
    assert_eq!(decimal(&ordinario["contributions_due"]), dec!(8400));
    assert_eq!(decimal(&ordinario["taxable_base"]), dec!(26600));
    assert_eq!(decimal(&ordinario["tax_due"]), dec!(6118));
    assert_eq!(decimal(&ordinario["net_income"]), dec!(35482));

    let forfetario = &report["forfetario"];
    assert_eq!(decimal(&forfetario["contributions_due"]), dec!(9360));
    assert_eq!(decimal(&forfetario["net_income"]), dec!(36194));

    assert_eq!(report["recommended"], "forfetario");
    assert_eq!(report["difference"], "712.00");
    assert_eq!(report["input"]["contribution_scheme"], "artisans-traders");
    assert_eq!(report["input"]["substitute_rate"], 15);
}

#[test]
fn simulate_from_input_file() {
    let output = assert_cmd::cargo_bin_cmd!("taxami")
        .args(["simulate", "--input", "tests/data/simulation.json", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal(&report["ordinario"]["net_income"]), dec!(35482));
    assert_eq!(decimal(&report["forfetario"]["net_income"]), dec!(36194));
    assert_eq!(report["recommended"], "forfetario");
}

#[test]
fn simulate_tiny_revenue_clamps_displayed_net_income() {
    let output = assert_cmd::cargo_bin_cmd!("taxami")
        .args([
            "simulate",
            "--revenue",
            "1000",
            "--category",
            "commercio",
            "--scheme",
            "artigiani",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // JSON keeps the raw, negative value
    assert_eq!(decimal(&report["forfetario"]["net_income"]), dec!(-3200));

    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args([
        "simulate",
        "--revenue",
        "1000",
        "--category",
        "commercio",
        "--scheme",
        "artigiani",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("-€3200.00").not())
        .stdout(predicate::str::contains("net income is negative"));
}

#[test]
fn simulate_tiny_revenue_under_contribution_floor() {
    let output = assert_cmd::cargo_bin_cmd!("taxami")
        .args(["simulate", "--revenue", "1e-28", "--scheme", "artigiani", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal(&report["forfetario"]["contributions_due"]), dec!(4200));
    assert!(report["forfetario"].get("effective_rate_pct").is_none());

    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate", "--revenue", "1e-28", "--scheme", "artigiani"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Effective tax pressure"));
}

#[test]
fn simulate_rejects_negative_revenue() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate", "--revenue=-100"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid gross revenue"));
}

#[test]
fn simulate_rejects_non_numeric_costs() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate", "--revenue", "100", "--costs", "molti"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("'molti' is not a number"));
}

#[test]
fn simulate_rejects_invalid_input_document() {
    let input = assert_fs::NamedTempFile::new("input.json").unwrap();
    input
        .write_str(r#"{"gross_revenue": "1000", "activity_coefficient": "1.5"}"#)
        .unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate", "--input"]).arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid activity coefficient"));
}

#[test]
fn simulate_requires_revenue() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["simulate"]);
    cmd.assert().failure();
}

#[test]
fn categories_table() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.arg("categories");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("servizi"))
        .stdout(predicate::str::contains("Costruzioni (41-43)"))
        .stdout(predicate::str::contains("86%"));
}

#[test]
fn categories_json() {
    let output = assert_cmd::cargo_bin_cmd!("taxami")
        .args(["categories", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let categories: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(categories.len(), 9);
    assert_eq!(categories[3]["key"], "servizi");
    assert_eq!(decimal(&categories[3]["coefficient"]), dec!(0.78));
}

#[test]
fn schema_simulation_input() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("taxami");
    cmd.args(["schema", "simulation-input"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"gross_revenue\""))
        .stdout(predicate::str::contains("\"activity_coefficient\""))
        .stdout(predicate::str::contains("artisans-traders"));
}
