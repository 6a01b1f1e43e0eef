use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_many_commands_streaming() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("many.csv");
    common::generate_commands_csv(&input, 5_000).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("paystate"))
        .arg(&input)
        .arg("--log-level")
        .arg("error")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header plus one row per payment
    assert_eq!(stdout.lines().count(), 5_001);
    assert!(stdout.lines().skip(1).all(|l| l.ends_with(",paypal,PAID")));
}
