//! CLI integration tests. None of these touch the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use alloy_primitives::{Address, B256};
use alloy_signer_local::PrivateKeySigner;
use predicates::prelude::*;

fn plstr() -> Command {
    let mut cmd = cargo_bin_cmd!("plstr");
    cmd.env_remove("WALLET_PRIVATE_KEY")
        .env_remove("PLSTR_KEYSTORE_PASSWORD")
        .env_remove("PLSTR_KEYSTORE_PASSWORD_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn missing_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

/// Encrypted keystore for a fixed key, plus a config pointing at it.
fn keystore_config() -> (tempfile::TempDir, std::path::PathBuf, Address) {
    let dir = tempfile::tempdir().unwrap();
    let (signer, _) = PrivateKeySigner::encrypt_keystore(
        dir.path(),
        &mut rand::thread_rng(),
        B256::repeat_byte(0x42),
        "correct horse",
        Some("plstr.json"),
    )
    .unwrap();
    let keystore = dir.path().join("plstr.json");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("[wallet]\nkeystore_path = {:?}\n", keystore.display().to_string()),
    )
    .unwrap();
    (dir, path, signer.address())
}

#[test]
fn help_lists_commands() {
    plstr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plstr"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("issue"))
        .stdout(predicate::str::contains("redeem"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn version_prints_name() {
    plstr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plstr"));
}

#[test]
fn issue_quote_shows_fee_and_net() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["quote", "issue", "1000", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value":"5 vPLS (0.5%)""#))
        .stdout(predicate::str::contains(r#""value":"995 PLSTR""#))
        .stdout(predicate::str::contains("below the issuance minimum"));
}

#[test]
fn issue_quote_for_garbage_input_is_zero() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["quote", "issue", "abc", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value":"0 PLSTR""#));
}

#[test]
fn invalid_amount_fails_before_connecting() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["redeem", "1.2.3", "--yes", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount"));
}

#[test]
fn below_minimum_issue_fails_before_connecting() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["issue", "1000", "--yes", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the minimum"));
}

#[test]
fn check_config_accepts_defaults() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"))
        .stdout(predicate::str::contains("read-only"));
}

#[test]
fn check_config_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[fees]\nissue_fee = 2.0\n").unwrap();

    plstr()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue_fee"));
}

#[test]
fn wallet_address_without_key_explains_setup() {
    let (_dir, path) = missing_config();
    plstr()
        .args(["wallet", "address", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WALLET_PRIVATE_KEY"));
}

#[test]
fn wallet_address_from_env_key() {
    let (_dir, path) = missing_config();
    plstr()
        .env(
            "WALLET_PRIVATE_KEY",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .args(["wallet", "address", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        ));
}

#[test]
fn keystore_unlocks_with_password_env() {
    let (_dir, path, address) = keystore_config();
    plstr()
        .env("PLSTR_KEYSTORE_PASSWORD", "correct horse")
        .args(["wallet", "address", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(address.to_string()));
}

#[test]
fn keystore_unlocks_with_password_file() {
    let (dir, path, address) = keystore_config();
    let password = dir.path().join("password");
    std::fs::write(&password, "correct horse\n").unwrap();
    plstr()
        .env("PLSTR_KEYSTORE_PASSWORD_FILE", &password)
        .args(["wallet", "address", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(address.to_string()));
}

#[test]
fn empty_password_file_is_reported() {
    let (dir, path, _) = keystore_config();
    let password = dir.path().join("password");
    std::fs::write(&password, "  \n").unwrap();
    plstr()
        .env("PLSTR_KEYSTORE_PASSWORD_FILE", &password)
        .args(["wallet", "address", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PLSTR_KEYSTORE_PASSWORD_FILE"));
}

#[test]
fn keystore_without_password_asks_for_one() {
    let (_dir, path, _) = keystore_config();
    plstr()
        .args(["wallet", "address", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field: PLSTR_KEYSTORE_PASSWORD"));
}

#[test]
fn wrong_keystore_password_is_rejected() {
    let (_dir, path, _) = keystore_config();
    plstr()
        .env("PLSTR_KEYSTORE_PASSWORD", "wrong")
        .args(["wallet", "address", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("keystore_path"));
}
