use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/commands.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "payment_id,amount,payment_method,status",
        ))
        .stdout(predicate::str::contains("P1,1000,credit-card,PAID"))
        .stdout(predicate::str::contains("P2,50,credit-card,REGISTERED"))
        .stdout(predicate::str::contains("P3,4999.99,paypal,PAID"))
        .stdout(predicate::str::contains("P4,5000,paypal,FAILED"))
        .stderr(predicate::str::contains("payment is in state PAID"));

    Ok(())
}
