//! End-to-end tests of the `coupon` binary.

use std::io::Write;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn coupon() -> Command {
    Command::cargo_bin("coupon").unwrap()
}

fn minimal_value(cmd: &mut Command) -> f64 {
    let output = cmd.args(["--format", "minimal"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.trim().trim_end_matches('%').parse().unwrap()
}

#[test]
fn test_price_from_yield() {
    let price = minimal_value(coupon().args([
        "price",
        "--coupon", "5.75",
        "--maturity", "2017-11-15",
        "--settlement", "2008-02-15",
        "--yield-value", "6.5",
    ]));
    assert!((price - 94.634362).abs() < 1e-6, "price {price}");
}

#[test]
fn test_yield_from_price() {
    let ytm = minimal_value(coupon().args([
        "price",
        "--coupon", "5.75",
        "--maturity", "2017-11-15",
        "--settlement", "2008-02-15",
        "--price", "94.634362",
    ]));
    assert!((ytm - 6.5).abs() < 1e-4, "yield {ytm}");
}

#[test]
fn test_bill_price() {
    let price = minimal_value(coupon().args([
        "bill",
        "--maturity", "2019-05-14",
        "--settlement", "2013-11-14",
        "--yield-value", "3.7894586",
    ]));
    assert!((price - 82.5585).abs() < 1e-4, "price {price}");
}

#[test]
fn test_bill_on_maturity_rejected() {
    coupon()
        .args([
            "bill",
            "--maturity", "2013-12-04",
            "--settlement", "2013-12-04",
            "--price", "99",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not before maturity"));
}

#[test]
fn test_analyze_json() {
    let output = coupon()
        .args([
            "analyze",
            "--coupon", "8",
            "--maturity", "2016-01-01",
            "--settlement", "2008-01-01",
            "--yield-value", "9",
            "--basis", "ACT/ACT",
            "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let macaulay = json["Macaulay Duration"].as_f64().unwrap();
    assert!((macaulay - 5.993775).abs() < 2e-6, "duration {macaulay}");
    assert!(json["Modified Duration"].as_f64().unwrap() < macaulay);
}

#[test]
fn test_schedule_table() {
    coupon()
        .args([
            "schedule",
            "--coupon", "4.5",
            "--maturity", "2003-01-01",
            "--settlement", "1993-10-01",
            "--basis", "ACT/ACT",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1994-01-01"))
        .stdout(predicate::str::contains("2003-01-01"));
}

#[test]
fn test_amortize_json_rows() {
    let output = coupon()
        .args([
            "amortize",
            "--coupon", "8.75",
            "--maturity", "2013-03-03",
            "--settlement", "2008-03-03",
            "--price", "100.589894",
            "--basis", "30E/360",
            "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 11);
    let premium: f64 = rows.iter().map(|row| row["PREMIUM"].as_f64().unwrap()).sum();
    assert!(premium.abs() < 1e-5, "premium left {premium}");
}

#[test]
fn test_value_contracts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"identifier": "C-001", "security_id": "BOND-2017", "issue_date": "2007-11-15",
              "maturity_date": "2017-11-15", "coupon_rate": 0.0575, "yield_rate": 0.065,
              "frequency": 2, "basis": "NASD_30_360"}},
            {{"identifier": "C-002", "security_id": "BOND-2017", "issue_date": "2007-11-15",
              "maturity_date": "2017-11-15", "coupon_rate": 0.0575, "yield_rate": 0.065,
              "frequency": 5, "basis": "NASD_30_360"}}
        ]"#
    )
    .unwrap();

    coupon()
        .arg("value")
        .arg(file.path())
        .args(["--settlement", "2008-02-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("94.634362"))
        .stderr(predicate::str::contains("C-002"));
}

#[test]
fn test_invalid_date_rejected() {
    coupon()
        .args(["price", "--coupon", "5", "--maturity", "2017-13-01", "--yield-value", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_invalid_basis_rejected() {
    coupon()
        .args([
            "accrued",
            "--coupon", "5",
            "--issue", "1996-04-01",
            "--basis", "ACT/366",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("day-count basis"));
}
