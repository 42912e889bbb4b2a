#[path = "../common/mod.rs"]
mod common;

use pn532tag::EmulatorConfig;
use pn532tag::ndef::{NdefMessage, build_uri_record, wrap_as_ndef_file};

#[test]
fn token_uri_decodes_with_https_prefix() {
    let uri = format!("{}{}", common::fixtures::BASE_URL, common::fixtures::sample_token());
    let message = build_uri_record(&uri).unwrap();
    let parsed = NdefMessage::parse(&message).unwrap();
    assert_eq!(parsed.records().len(), 1);
    assert_eq!(parsed.records()[0].uri().as_deref(), Some(common::fixtures::sample_uri()));
}

#[test]
fn config_builds_the_same_file() {
    let cfg = EmulatorConfig::default();
    let from_config = cfg.ndef_file(&common::fixtures::sample_token()).unwrap();
    let uri = format!("{}{}", common::fixtures::BASE_URL, common::fixtures::sample_token());
    let manual = wrap_as_ndef_file(&build_uri_record(&uri).unwrap()).unwrap();
    assert_eq!(from_config, manual);
    assert_eq!(hex::encode(&from_config[..7]), "001fd1011b5504");
}
