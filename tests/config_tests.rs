use std::io::Write;

use plstr::domain::Amount;
use plstr::error::{ConfigError, Error};
use plstr::infrastructure::config::Config;
use rust_decimal_macros::dec;

fn write_temp_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("plstr-config-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes())
        .expect("write temp config");
    file
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.network.chain_id, 1);
    assert!(!config.network.rpc_urls.is_empty());
    assert_eq!(config.fees.min_issue, Amount::from_tokens(1005));
}

#[test]
fn file_overrides_selected_sections() {
    let file = write_temp_config(
        r#"
[network]
chain_id = 369
rpc_urls = ["https://rpc.pulsechain.com"]
probe_timeout_ms = 2500

[fees]
issue_fee = 0.01
min_issue = "10.5"

[retry]
max_attempts = 5
"#,
    );

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.network.chain_id, 369);
    assert_eq!(config.network.rpc_urls.len(), 1);
    assert_eq!(config.network.probe_timeout_ms, 2500);
    assert_eq!(config.fees.issue_fee, dec!(0.01));
    assert_eq!(config.fees.min_issue, Amount::parse("10.5").unwrap());
    assert_eq!(config.retry.max_attempts, 5);
    // untouched sections keep their defaults
    assert_eq!(config.fees.redeem_fee, dec!(0));
    assert_eq!(
        config.contract.address.to_string(),
        "0x6c1dA678A1B615f673208e74AB3510c22117090e"
    );
}

#[test]
fn rejects_empty_endpoint_list() {
    let file = write_temp_config("[network]\nrpc_urls = []\n");
    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::MissingField { field: "rpc_urls" })) => {}
        Err(err) => panic!("Expected missing rpc_urls, got {err}"),
        Ok(_) => panic!("Expected empty rpc_urls to be rejected"),
    }
}

#[test]
fn rejects_websocket_endpoints() {
    let file = write_temp_config("[network]\nrpc_urls = [\"wss://ethereum-rpc.publicnode.com\"]\n");
    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "rpc_urls",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid rpc_urls, got {err}"),
        Ok(_) => panic!("Expected wss endpoint to be rejected"),
    }
}

#[test]
fn rejects_fee_of_one_or_more() {
    let file = write_temp_config("[fees]\nredeem_fee = 1.0\n");
    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "redeem_fee",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid redeem_fee, got {err}"),
        Ok(_) => panic!("Expected redeem_fee = 1 to be rejected"),
    }
}

#[test]
fn rejects_bad_min_issue_amount() {
    let file = write_temp_config("[fees]\nmin_issue = \"12.3.4\"\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn rejects_malformed_toml() {
    let file = write_temp_config("[network\nchain_id = 1\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
