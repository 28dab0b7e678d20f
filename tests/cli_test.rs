use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn params_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

fn fortpay() -> Command {
    let mut cmd = Command::new(cargo_bin!("fortpay"));
    cmd.env("FORT_MERCHANT_IDENTIFIER", "CycHZxVj")
        .env("FORT_ACCESS_CODE", "zx0IPmPy5jp1vAz8Kpg7")
        .env("FORT_SHA_REQUEST_PHRASE", "PASS")
        .env("FORT_SHA_RESPONSE_PHRASE", "PASSOUT")
        .env_remove("FORT_SHA_TYPE")
        .env_remove("FORT_PRODUCTION");
    cmd
}

#[test]
fn test_sign_known_vector() {
    let file = params_file(
        r#"{
            "command": "PURCHASE",
            "access_code": "zx0IPmPy5jp1vAz8Kpg7",
            "merchant_identifier": "CycHZxVj",
            "merchant_reference": "XYZ9239-yu898",
            "amount": 1000,
            "currency": "USD",
            "language": "en",
            "customer_email": "test@payfort.com"
        }"#,
    );

    fortpay()
        .arg("sign")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a780ba7efe37775e81b95f4fb8cfd0f015d3189f16596ac4e9160c31c7ea0cd8",
        ));
}

#[test]
fn test_sign_rejects_non_object_input() {
    let file = params_file("[1, 2, 3]");

    fortpay()
        .arg("sign")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_authorize_validation_failure_before_dispatch() {
    let file = params_file(r#"{"merchant_reference": "ORD-1", "amount": 1000, "token_name": "Op9Vmp"}"#);

    fortpay()
        .args(["authorize", "--method", "merchant-page"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed"))
        .stderr(predicate::str::contains("customer_email is required"));
}

#[test]
fn test_authorize_dry_run_prints_signed_request() {
    let file = params_file(
        r#"{
            "merchant_reference": "ORD-2",
            "amount": 2500,
            "customer_email": "buyer@example.com",
            "token_name": "Op9Vmp",
            "currency": "USD"
        }"#,
    );

    fortpay()
        .args(["authorize", "--method", "merchant-page", "--dry-run"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\": \"AUTHORIZATION\""))
        .stdout(predicate::str::contains("\"currency\": \"USD\""))
        .stdout(predicate::str::contains("\"signature\""));
}

#[test]
fn test_check_status_dry_run() {
    fortpay()
        .args(["check-status", "--merchant-reference", "ORD-3", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"query_command\": \"CHECK_STATUS\""));
}

#[test]
fn test_tokenize_prints_page_form() {
    fortpay()
        .args([
            "tokenize",
            "--merchant-reference",
            "ORD-4",
            "--return-url",
            "https://shop.example.com/return",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("sbcheckout.payfort.com"))
        .stdout(predicate::str::contains("\"service_command\": \"TOKENIZATION\""));
}

#[test]
fn test_missing_account_settings() {
    Command::new(cargo_bin!("fortpay"))
        .env_clear()
        .args(["check-status", "--merchant-reference", "ORD-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--merchant-identifier"));
}
