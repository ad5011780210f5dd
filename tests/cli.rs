//! Exit status of the binary when a run fails.

use std::process::{Command, Output};

fn run_client(args: &[&str], env: &[(&str, &str)]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_fabric-order-client"))
        .args(args)
        .env_clear()
        .envs(env.iter().copied())
        .env("RUST_LOG", "fabric_order_client=info")
        .current_dir(dir.path())
        .output()
        .unwrap()
}

fn assert_failed(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    let logs = String::from_utf8_lossy(&output.stdout);
    assert!(
        logs.contains("FAILED to run the application"),
        "missing failure log in: {logs}"
    );
}

#[test]
fn test_missing_credentials_exit_non_zero() {
    let crypto = tempfile::tempdir().unwrap();
    let crypto_path = crypto.path().to_string_lossy().into_owned();

    let output = run_client(&["read", "--id", "5"], &[("CRYPTO_PATH", crypto_path.as_str())]);
    assert_failed(&output);
    assert!(!String::from_utf8_lossy(&output.stdout).contains("*** Result"));
}

#[test]
fn test_invalid_configuration_exits_non_zero() {
    let output = run_client(&[], &[("PEER_ENDPOINT", "localhost")]);
    assert_failed(&output);
}

#[test]
fn test_malformed_order_exits_non_zero() {
    let output = run_client(&["register", "--order", "{\"id\": 5.5}"], &[]);
    assert_failed(&output);
}
