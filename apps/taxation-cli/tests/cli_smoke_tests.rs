#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the taxation-cli binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PROVIDER_KEY: &str = "5b0e4a64-3f7c-4c55-9a3d-2f0c1f0e9a11";
const EXEMPT_CUSTOMER: &str = "0d6f1a5e-8d2b-4a3c-9f61-7e2b5c4d3a21";

const CONFIG: &str = r#"
logging:
  level: "warn"
taxation:
  untaxed_country_policy: "zero"
fixed_rate_providers:
  - key: "5b0e4a64-3f7c-4c55-9a3d-2f0c1f0e9a11"
    name: "North America"
    tax_methods:
      - name: "US sales tax"
        country_code: "US"
        rate: "0.07"
      - name: "Canada GST"
        country_code: "CA"
        rate: "0.05"
        provinces:
          - code: "ON"
            rate_adjustment: "0.08"
customers:
  - key: "0d6f1a5e-8d2b-4a3c-9f61-7e2b5c4d3a21"
    login_name: "charity"
    tax_exempt: true
"#;

fn run_taxation_cli(args: &[&str]) -> Output {
    run_taxation_cli_with_env(args, &[])
}

fn run_taxation_cli_with_env(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taxation-cli"))
        .args(args)
        .envs(envs.iter().copied())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute taxation-cli")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn invoice_yaml(country: &str, region: &str, customer: Option<&str>) -> String {
    let customer = customer.map_or_else(String::new, |key| format!("customer_key: \"{key}\"\n"));
    format!(
        r#"invoice_number: "INV-1001"
{customer}billing_address:
  address1: "1 Main St"
  locality: "Springfield"
  region: "{region}"
  postal_code: "12345"
  country_code: "{country}"
items:
  - sku: "widget"
    quantity: 4
    price: "25.00"
  - sku: "gift-card"
    price: "50.00"
    taxable: false
"#
    )
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help_command() {
    let output = run_taxation_cli(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("check"));
    assert!(stdout.contains("tax-methods"));
    assert!(stdout.contains("calculate"));
}

#[test]
fn test_cli_check_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);

    let output = run_taxation_cli(&["--config", path_str(&config), "check"]);

    assert!(
        output.status.success(),
        "check should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json = stdout_json(&output);
    assert_eq!(json["fixed_rate_providers"][0]["key"], PROVIDER_KEY);
    assert_eq!(json["fixed_rate_providers"][0]["priority"], 100);
    assert_eq!(json["taxation"]["untaxed_country_policy"], "zero");
}

#[test]
fn test_cli_check_without_config_uses_defaults() {
    let output = run_taxation_cli(&["check"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["logging"]["level"], "warn");
    assert!(json["fixed_rate_providers"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);

    let output = run_taxation_cli_with_env(
        &["--config", path_str(&config), "check"],
        &[("TAXATION__TAXATION__UNTAXED_COUNTRY_POLICY", "reject")],
    );

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["taxation"]["untaxed_country_policy"],
        "reject"
    );
}

#[test]
fn test_cli_missing_config_file_fails() {
    let output = run_taxation_cli(&["--config", "/nonexistent/taxation.yaml", "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"));
}

#[test]
fn test_cli_invalid_rate_fails_validation() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", &CONFIG.replace("\"0.07\"", "\"1.07\""));

    let output = run_taxation_cli(&["--config", path_str(&config), "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside [0, 1]"), "stderr: {stderr}");
}

#[test]
fn test_cli_tax_methods_for_provider() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);

    let output = run_taxation_cli(&[
        "--config",
        path_str(&config),
        "tax-methods",
        "--provider",
        PROVIDER_KEY,
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    let methods = json.as_array().unwrap();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0]["country_code"], "US");
    assert_eq!(methods[0]["rate"], "0.07");
    assert_eq!(methods[1]["provinces"][0]["code"], "ON");
}

#[test]
fn test_cli_tax_methods_unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);

    let output = run_taxation_cli(&[
        "--config",
        path_str(&config),
        "tax-methods",
        "--provider",
        "00000000-0000-0000-0000-000000000001",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn test_cli_calculate_routes_by_billing_country() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);
    let invoice = write_file(&dir, "invoice.yaml", &invoice_yaml("US", "IL", None));

    let output = run_taxation_cli(&[
        "--config",
        path_str(&config),
        "calculate",
        "--invoice",
        path_str(&invoice),
    ]);

    assert!(
        output.status.success(),
        "calculate should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json = stdout_json(&output);
    assert_eq!(json["taxable_amount"], "100.00");
    assert_eq!(json["tax_amount"], "7.00");
}

#[test]
fn test_cli_calculate_with_explicit_provider_and_province() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);
    let invoice = write_file(&dir, "invoice.yaml", &invoice_yaml("CA", "ON", None));

    let output = run_taxation_cli(&[
        "--config",
        path_str(&config),
        "calculate",
        "--invoice",
        path_str(&invoice),
        "--provider",
        PROVIDER_KEY,
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["tax_rate"], "0.13");
    assert_eq!(json["tax_amount"], "13.00");
}

#[test]
fn test_cli_calculate_tax_exempt_customer() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);
    let invoice = write_file(
        &dir,
        "invoice.yaml",
        &invoice_yaml("US", "IL", Some(EXEMPT_CUSTOMER)),
    );

    let output = run_taxation_cli(&[
        "--config",
        path_str(&config),
        "calculate",
        "--invoice",
        path_str(&invoice),
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["tax_amount"], "0");
    assert!(json["tax_method_key"].is_null());
}

#[test]
fn test_cli_calculate_untaxed_country_rejected_by_policy() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.yaml", CONFIG);
    let invoice = write_file(&dir, "invoice.yaml", &invoice_yaml("JP", "13", None));

    let output = run_taxation_cli_with_env(
        &[
            "--config",
            path_str(&config),
            "calculate",
            "--invoice",
            path_str(&invoice),
        ],
        &[("TAXATION__TAXATION__UNTAXED_COUNTRY_POLICY", "reject")],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No tax method configured for country: JP"), "stderr: {stderr}");
}
